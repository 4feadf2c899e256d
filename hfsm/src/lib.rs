//! `hfsm`, a compile-time-configured hierarchical finite-state-machine
//! engine.
//!
//! A machine is a unit struct declaring an initial state and a list of
//! transitions built with the [`core`] module's method-chain builder (or
//! with the [`machine!`] macro, which emits that boilerplate for you).
//! Machines can `Enter`/`Exit` other machines, which [`core::StateMachine`]
//! flattens into one event-driven dispatcher at construction.
//!
//! ```ignore
//! use hfsm::core::*;
//!
//! #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
//! enum DoorState { Open, Closed }
//!
//! #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
//! enum DoorEventId { Open, Close }
//!
//! enum DoorEvent { Open, Close }
//! impl EventPayload for DoorEvent {
//!     type Id = DoorEventId;
//!     fn event_id(&self) -> DoorEventId {
//!         match self {
//!             DoorEvent::Open => DoorEventId::Open,
//!             DoorEvent::Close => DoorEventId::Close,
//!         }
//!     }
//! }
//!
//! struct Door;
//! impl Machine for Door {
//!     type State = DoorState;
//!     type Payload = DoorEvent;
//!     type Data = ();
//!     const INITIAL: DoorState = DoorState::Closed;
//!     fn transitions() -> Vec<TransitionSpec<DoorState, DoorEvent, ()>> {
//!         vec![
//!             from(DoorState::Closed).on(DoorEventId::Open).to(DoorState::Open),
//!             from(DoorState::Open).on(DoorEventId::Close).to(DoorState::Closed),
//!         ]
//!     }
//! }
//!
//! let mut sm = StateMachine::new::<Door>(()).unwrap();
//! sm.begin();
//! assert!(sm.feed(DoorEvent::Open));
//! assert!(sm.is::<Door>(DoorState::Open));
//! ```

pub mod core {
    pub use hfsm_core::*;
}

pub use hfsm_core::{
    AssemblyError, EventId, EventPayload, EventTag, InEvent, Machine, MachineHandle, Node,
    StateId, StateMachine, TransitionSpec, handle_of,
};
pub use hfsm_macro::machine;
