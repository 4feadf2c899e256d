//! Machine assembly (spec component C3): flattens a root machine and every
//! machine transitively reachable through `Enter` into one combined
//! transition list and one combined state list.

use std::any::TypeId;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::error::AssemblyError;
use crate::ids::{EventTag, Node, StateId};
use crate::payload::EventPayload;
use crate::transition::{
    Action, Guard, Machine, MachineHandle, RawDst, RawEvent, RawSrc, TransitionSpec, handle_of,
};

/// A transition's source predicate after tagging with the owning machine's
/// `TypeId`.
pub enum ResolvedSrc<S: StateId> {
    One(TypeId, Node<S>),
    Set(Vec<(TypeId, Node<S>)>),
    Wildcard(TypeId),
}

/// A transition's destination policy, reduced to the sum type
/// spec.md §9 names: `{Concrete(GlobalStateIdx-to-be), Keep, Bypass}`. The
/// concrete index itself is resolved later by the dispatcher, which already
/// has the final `GlobalStates` table to look it up in.
pub enum ResolvedDst<S: StateId> {
    Concrete(TypeId, Node<S>),
    Keep,
    Bypass,
}

/// One transition after assembly: source/destination fully qualified with a
/// `MachineTag`, owning machine recorded for wildcard-locality checks.
pub struct Tagged<S: StateId, P: EventPayload, D> {
    pub machine: TypeId,
    pub machine_name: &'static str,
    pub src: ResolvedSrc<S>,
    pub event: RawEvent<P::Id>,
    pub guards: Vec<Guard<S, P, D>>,
    pub actions: Vec<Action<S, P, D>>,
    pub dst: ResolvedDst<S>,
}

/// The output of assembly: `(Transitions[], GlobalStates[], EventIds[])`
/// from spec.md §4.1, plus the per-machine local event-id sets wildcard
/// resolution needs (spec.md §4.2/§8 property 6).
pub struct Assembled<S: StateId, P: EventPayload, D> {
    pub global_states: Vec<(TypeId, Node<S>)>,
    pub transitions: Vec<Arc<Tagged<S, P, D>>>,
    pub local_event_ids: HashMap<TypeId, HashSet<EventTag<P::Id>>>,
    pub global_event_ids: HashSet<EventTag<P::Id>>,
    pub initial_index: usize,
}

fn push_state<S: StateId>(
    global_states: &mut Vec<(TypeId, Node<S>)>,
    seen: &mut HashSet<(TypeId, Node<S>)>,
    key: (TypeId, Node<S>),
) {
    if seen.insert(key) {
        global_states.push(key);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

fn visit_for_cycle(
    node: TypeId,
    edges: &HashMap<TypeId, Vec<TypeId>>,
    names: &HashMap<TypeId, &'static str>,
    color: &mut HashMap<TypeId, Color>,
) -> Result<(), AssemblyError> {
    color.insert(node, Color::Gray);
    if let Some(children) = edges.get(&node) {
        for &child in children {
            match color.get(&child).copied().unwrap_or(Color::White) {
                Color::White => visit_for_cycle(child, edges, names, color)?,
                Color::Gray => {
                    return Err(AssemblyError::CyclicEnter {
                        machine: names.get(&child).copied().unwrap_or("<unknown machine>"),
                    });
                }
                Color::Black => {}
            }
        }
    }
    color.insert(node, Color::Black);
    Ok(())
}

/// Flatten `R` and every machine reachable through `Enter` into one
/// [`Assembled`] table. Discovery is automatic: machines are stateless
/// marker types, so there is nothing for the caller to supply beyond `R`
/// itself (see DESIGN.md, OQ-2).
pub fn assemble<R: Machine>() -> Result<Assembled<R::State, R::Payload, R::Data>, AssemblyError> {
    type Tag<P> = EventTag<<P as EventPayload>::Id>;

    let root = handle_of::<R>();

    let mut order: Vec<MachineHandle<R::State, R::Payload, R::Data>> = Vec::new();
    let mut raw: HashMap<TypeId, Vec<TransitionSpec<R::State, R::Payload, R::Data>>> =
        HashMap::new();
    let mut names: HashMap<TypeId, &'static str> = HashMap::new();
    let mut edges: HashMap<TypeId, Vec<TypeId>> = HashMap::new();
    let mut visited: HashSet<TypeId> = HashSet::new();
    let mut queue: VecDeque<MachineHandle<R::State, R::Payload, R::Data>> = VecDeque::new();

    visited.insert(root.type_id);
    queue.push_back(root);

    while let Some(handle) = queue.pop_front() {
        let transitions = (handle.transitions)();
        let mut this_edges = Vec::new();
        for t in &transitions {
            if let RawDst::Enter(target) = &t.dst {
                this_edges.push(target.type_id);
                if visited.insert(target.type_id) {
                    queue.push_back(*target);
                }
            }
        }
        edges.insert(handle.type_id, this_edges);
        names.insert(handle.type_id, handle.name);
        order.push(handle);
        raw.insert(handle.type_id, transitions);
    }

    let mut color = HashMap::new();
    visit_for_cycle(root.type_id, &edges, &names, &mut color)?;

    debug!(machines = order.len(), "assembled machine graph");

    let mut transitions: Vec<Arc<Tagged<R::State, R::Payload, R::Data>>> = Vec::new();
    let mut global_states: Vec<(TypeId, Node<R::State>)> = Vec::new();
    let mut seen_states: HashSet<(TypeId, Node<R::State>)> = HashSet::new();
    let mut local_event_ids: HashMap<TypeId, HashSet<Tag<R::Payload>>> = HashMap::new();
    let mut global_event_ids: HashSet<Tag<R::Payload>> = HashSet::new();

    push_state(
        &mut global_states,
        &mut seen_states,
        (root.type_id, Node::Id(root.initial)),
    );

    for handle in &order {
        let machine_name = handle.name;
        let machine_tid = handle.type_id;
        let machine_transitions = raw
            .remove(&machine_tid)
            .expect("every discovered machine was assigned its transitions");
        let locals = local_event_ids.entry(machine_tid).or_default();

        for t in machine_transitions {
            let TransitionSpec {
                src,
                event,
                guards,
                actions,
                dst,
            } = t;

            let resolved_src = match src {
                RawSrc::One(s) => {
                    let key = (machine_tid, Node::Id(s));
                    push_state(&mut global_states, &mut seen_states, key);
                    ResolvedSrc::One(key.0, key.1)
                }
                RawSrc::Set(ss) => {
                    let mut pairs = Vec::with_capacity(ss.len());
                    for s in ss {
                        let key = (machine_tid, Node::Id(s));
                        push_state(&mut global_states, &mut seen_states, key);
                        pairs.push(key);
                    }
                    ResolvedSrc::Set(pairs)
                }
                RawSrc::Wildcard => ResolvedSrc::Wildcard(machine_tid),
                RawSrc::ExitOf(target) => {
                    if !visited.contains(&target.type_id) {
                        return Err(AssemblyError::UnknownDestination {
                            machine: machine_name,
                            state: format!("{}::Terminal (never entered)", target.name),
                        });
                    }
                    let key = (target.type_id, Node::Terminal);
                    push_state(&mut global_states, &mut seen_states, key);
                    ResolvedSrc::One(key.0, key.1)
                }
            };

            match &event {
                RawEvent::One(tag) => {
                    locals.insert(*tag);
                    global_event_ids.insert(*tag);
                }
                RawEvent::Set(tags) => {
                    for tag in tags {
                        locals.insert(*tag);
                        global_event_ids.insert(*tag);
                    }
                }
                RawEvent::Wildcard => {}
            }

            let resolved_dst = match dst {
                RawDst::To(s) => ResolvedDst::Concrete(machine_tid, Node::Id(s)),
                RawDst::Keep => ResolvedDst::Keep,
                RawDst::Bypass => ResolvedDst::Bypass,
                RawDst::Enter(target) => {
                    ResolvedDst::Concrete(target.type_id, Node::Id(target.initial))
                }
                RawDst::Exit => ResolvedDst::Concrete(machine_tid, Node::Terminal),
            };

            if let ResolvedDst::Concrete(tid, node) = &resolved_dst {
                push_state(&mut global_states, &mut seen_states, (*tid, *node));
            }

            transitions.push(Arc::new(Tagged {
                machine: machine_tid,
                machine_name,
                src: resolved_src,
                event,
                guards,
                actions,
                dst: resolved_dst,
            }));
        }
    }

    let initial_index = global_states
        .iter()
        .position(|pair| *pair == (root.type_id, Node::Id(root.initial)))
        .expect("root initial state was seeded into global_states above");

    Ok(Assembled {
        global_states,
        transitions,
        local_event_ids,
        global_event_ids,
        initial_index,
    })
}
