//! Transition record (spec component C2) and the declarative `Machine`
//! interface a machine author implements (spec component C6,
//! "declarative interface").

use std::any::TypeId;

use crate::ids::{EventId, EventTag, Node, StateId};
use crate::payload::{EventPayload, InEvent};

/// `(srcId, &eventPayload, &data) -> bool`. Must be pure: it receives `&D`,
/// not `&mut D`, so it structurally cannot mutate user state.
///
/// The source id is `Node<S>` rather than a bare `S`: a transition sourced
/// from another machine's `Exit` (an `ExitOf` reference) fires with the
/// reserved `TerminalStateId`, which is not a value of `S` and so can only
/// be represented as `Node::Terminal`.
pub type Guard<S, P, D> = Box<dyn Fn(Node<S>, &InEvent<'_, P>, &D) -> bool + Send + Sync>;

/// `(srcId, &eventPayload, &mut data)`. May mutate user state.
pub type Action<S, P, D> = Box<dyn Fn(Node<S>, &InEvent<'_, P>, &mut D) + Send + Sync>;

/// A handle to a machine type: its `TypeId` (used as the runtime
/// `MachineTag`), its initial state, and a function pointer to its
/// `transitions()`. Obtained through [`handle_of`]; used by `Enter`/`ExitOf`
/// builder references so submachines never need to be instantiated.
pub struct MachineHandle<S: StateId, P: EventPayload, D> {
    pub type_id: TypeId,
    pub name: &'static str,
    pub initial: S,
    pub transitions: fn() -> Vec<TransitionSpec<S, P, D>>,
}

impl<S: StateId, P: EventPayload, D> Clone for MachineHandle<S, P, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: StateId, P: EventPayload, D> Copy for MachineHandle<S, P, D> {}

/// A user-declared machine: a zero-sized marker type naming its state/event
/// types and listing its transitions. Submachines implement this trait the
/// same way the root machine does; there is no separate "submachine" trait.
pub trait Machine: 'static {
    type State: StateId;
    type Payload: EventPayload;
    type Data;

    const INITIAL: Self::State;

    fn transitions() -> Vec<TransitionSpec<Self::State, Self::Payload, Self::Data>>;
}

pub fn handle_of<M: Machine>() -> MachineHandle<M::State, M::Payload, M::Data> {
    MachineHandle {
        type_id: TypeId::of::<M>(),
        name: std::any::type_name::<M>(),
        initial: M::INITIAL,
        transitions: M::transitions,
    }
}

/// A transition's source predicate, before assembly tags it with its owning
/// machine's `TypeId`.
pub enum RawSrc<S: StateId, P: EventPayload, D> {
    One(S),
    Set(Vec<S>),
    Wildcard,
    /// A foreign reference to another machine's terminal (`Exit`) state,
    /// used by a host machine's transitions per scenario S5. Unlike `One`/
    /// `Set`/`Wildcard`, this is already fully qualified at declaration
    /// time and is preserved unchanged by assembly.
    ExitOf(MachineHandle<S, P, D>),
}

/// A transition's destination policy.
pub enum RawDst<S: StateId, P: EventPayload, D> {
    To(S),
    Keep,
    Bypass,
    /// Resolved at assembly time to `(M, M::INITIAL)`.
    Enter(MachineHandle<S, P, D>),
    /// `(this machine, TerminalStateId)`.
    Exit,
}

/// A transition's event predicate.
pub enum RawEvent<E: EventId> {
    One(EventTag<E>),
    Set(Vec<EventTag<E>>),
    Wildcard,
}

/// One immutable transition record (spec.md §3).
pub struct TransitionSpec<S: StateId, P: EventPayload, D> {
    pub src: RawSrc<S, P, D>,
    pub event: RawEvent<P::Id>,
    pub guards: Vec<Guard<S, P, D>>,
    pub actions: Vec<Action<S, P, D>>,
    pub dst: RawDst<S, P, D>,
}
