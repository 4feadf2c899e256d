//! Identifier model (spec component C1).
//!
//! `StateId` and `EventId` are blanket-implemented marker traits: any type
//! the user chooses that is `Copy + Eq + Hash + Debug + Send + Sync +
//! 'static` can serve as a state or event id, mirroring the `MachineState`
//! blanket impl this crate was ported from.
//!
//! The four reserved ids (`OnEnter`, `OnExit`, `Terminal`, `Bypass`, `Keep`)
//! are never values of `S`/`E`; they are separate enum variants so a user id
//! can never accidentally collide with one.

use std::fmt::Debug;
use std::hash::Hash;

/// A user-chosen state identifier.
pub trait StateId: Copy + Eq + Hash + Debug + Send + Sync + 'static {}
impl<T: Copy + Eq + Hash + Debug + Send + Sync + 'static> StateId for T {}

/// A user-chosen event identifier (the routing key, not the payload).
pub trait EventId: Copy + Eq + Hash + Debug + Send + Sync + 'static {}
impl<T: Copy + Eq + Hash + Debug + Send + Sync + 'static> EventId for T {}

/// An event id together with the two reserved pseudo-events the runtime
/// synthesizes on state change. Never constructed by user code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EventTag<E: EventId> {
    User(E),
    OnEnter,
    OnExit,
}

/// A state id together with the reserved terminal marker used by
/// `Exit` transitions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Node<S: StateId> {
    Id(S),
    Terminal,
}
