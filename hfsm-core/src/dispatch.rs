//! Per-event dispatcher (spec component C4).
//!
//! One [`Dispatcher`] is precomputed per concrete event id (including the
//! reserved `OnEnter`/`OnExit` ids) at runtime construction; `dispatch` is
//! the only thing called on the hot path and does no allocation.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::assembly::{Assembled, ResolvedDst, ResolvedSrc, Tagged};
use crate::ids::{EventTag, Node, StateId};
use crate::payload::{EventPayload, InEvent};

/// Sentinel returned by [`Dispatcher::dispatch`] when no transition
/// committed a destination.
pub const NO_MATCH: Option<usize> = None;

pub struct Dispatcher<S: StateId, P: EventPayload, D> {
    event: EventTag<P::Id>,
    event_transitions: Vec<Arc<Tagged<S, P, D>>>,
    /// `GlobalStateIdx -> OutboundStateIdx`, or `None` for "no `E`-transition
    /// sources this state" (the fast NoMatch short-circuit).
    injection: Vec<Option<usize>>,
    /// Kept for introspection/testing of spec.md §8 property 5
    /// ("injection correctness"); `dispatch` itself only needs `injection`'s
    /// `is_some()`-ness.
    pub outbound_states: Vec<(TypeId, Node<S>)>,
}

fn event_matches<E: crate::ids::EventId>(
    spec: &crate::transition::RawEvent<E>,
    tag: EventTag<E>,
    locals: Option<&HashSet<EventTag<E>>>,
) -> bool {
    use crate::transition::RawEvent;
    match spec {
        RawEvent::One(t) => *t == tag,
        RawEvent::Set(ts) => ts.contains(&tag),
        RawEvent::Wildcard => locals.is_some_and(|l| l.contains(&tag)),
    }
}

fn src_covers<S: StateId>(src: &ResolvedSrc<S>, current: (TypeId, Node<S>)) -> bool {
    match src {
        ResolvedSrc::One(tid, node) => (*tid, *node) == current,
        ResolvedSrc::Set(pairs) => pairs.contains(&current),
        ResolvedSrc::Wildcard(tid) => *tid == current.0,
    }
}

/// Build the dispatcher for one concrete event tag from an assembled graph.
pub fn build_dispatcher<S: StateId, P: EventPayload, D>(
    assembled: &Assembled<S, P, D>,
    tag: EventTag<P::Id>,
) -> Dispatcher<S, P, D> {
    let event_transitions: Vec<Arc<Tagged<S, P, D>>> = assembled
        .transitions
        .iter()
        .filter(|t| event_matches(&t.event, tag, assembled.local_event_ids.get(&t.machine)))
        .cloned()
        .collect();

    let mut outbound_states: Vec<(TypeId, Node<S>)> = Vec::new();
    let mut seen: HashSet<(TypeId, Node<S>)> = HashSet::new();
    for t in &event_transitions {
        match &t.src {
            ResolvedSrc::One(tid, node) => {
                if seen.insert((*tid, *node)) {
                    outbound_states.push((*tid, *node));
                }
            }
            ResolvedSrc::Set(pairs) => {
                for pair in pairs {
                    if seen.insert(*pair) {
                        outbound_states.push(*pair);
                    }
                }
            }
            ResolvedSrc::Wildcard(tid) => {
                for pair in &assembled.global_states {
                    if pair.0 == *tid && seen.insert(*pair) {
                        outbound_states.push(*pair);
                    }
                }
            }
        }
    }

    let injection: Vec<Option<usize>> = assembled
        .global_states
        .iter()
        .map(|pair| outbound_states.iter().position(|p| p == pair))
        .collect();

    Dispatcher {
        event: tag,
        event_transitions,
        injection,
        outbound_states,
    }
}

impl<S: StateId, P: EventPayload, D> Dispatcher<S, P, D> {
    /// `dispatch(g, payload) -> next_global_idx or NoMatch`, per spec.md §4.2.
    pub fn dispatch(
        &self,
        global_idx: usize,
        global_states: &[(TypeId, Node<S>)],
        payload: &InEvent<'_, P>,
        data: &mut D,
    ) -> Option<usize> {
        self.injection[global_idx]?;
        let current = global_states[global_idx];

        for t in &self.event_transitions {
            if !src_covers(&t.src, current) {
                continue;
            }
            if !t.guards.iter().all(|g| g(current.1, payload, data)) {
                continue;
            }
            for action in &t.actions {
                action(current.1, payload, data);
            }
            match &t.dst {
                ResolvedDst::Bypass => continue,
                ResolvedDst::Keep => {
                    trace!(event = ?self.event, state = global_idx, "dispatch: keep");
                    return Some(global_idx);
                }
                ResolvedDst::Concrete(tid, node) => {
                    let key = (*tid, *node);
                    let idx = global_states
                        .iter()
                        .position(|pair| *pair == key)
                        .expect("assembly validated every concrete destination");
                    trace!(event = ?self.event, from = global_idx, to = idx, "dispatch: commit");
                    return Some(idx);
                }
            }
        }
        None
    }
}
