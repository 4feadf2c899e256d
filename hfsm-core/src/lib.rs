//! Core engine for `hfsm`: a compile-time-configured hierarchical
//! finite-state-machine engine.
//!
//! This crate implements the transition-matching core: the identifier
//! model, the transition record, machine assembly (flattening nested
//! machines into one transition/state table), the per-event dispatcher,
//! and the runtime that drives it. DSL ergonomics live in `hfsm-macro` and
//! the `hfsm` facade crate.

pub mod assembly;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod payload;
pub mod runtime;
pub mod transition;

pub use assembly::{Assembled, ResolvedDst, ResolvedSrc, Tagged, assemble};
pub use builder::{EventStub, SrcStub, exit_of, from, from_any, from_set};
pub use dispatch::{Dispatcher, build_dispatcher};
pub use error::AssemblyError;
pub use ids::{EventId, EventTag, Node, StateId};
pub use payload::{EventPayload, InEvent};
pub use runtime::StateMachine;
pub use transition::{
    Action, Guard, Machine, MachineHandle, RawDst, RawEvent, RawSrc, TransitionSpec, handle_of,
};
