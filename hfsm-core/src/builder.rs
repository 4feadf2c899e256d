//! Plain method-chain builder for transition records (spec component C6).
//!
//! Construction is staged at the type level: a source stub only offers
//! `.on*()`, an event stub only offers `.when`/`.run`/the terminating
//! destination methods, so a transition record cannot be built out of
//! order; the compiler enforces spec.md §6's construction-step sequence
//! instead of a runtime check.
//!
//! spec.md §6 also describes optional operator-sugar aliases (`==` for
//! `when`, `!=`/`|` for `run`, `+` for `on`, `=` for `to`), carried over
//! from the C++ original's operator overloads. Rust's operator traits have
//! fixed return types unrelated to this builder (`PartialEq::eq` must
//! return `bool`), so that sugar is dropped here; only the plain method
//! chain is implemented.

use crate::ids::EventTag;
use crate::payload::{EventPayload, InEvent};
use crate::transition::{Action, Guard, Machine, RawDst, RawEvent, RawSrc, TransitionSpec, handle_of};

pub struct SrcStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    src: RawSrc<S, P, D>,
}

pub struct EventStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    src: RawSrc<S, P, D>,
    event: RawEvent<P::Id>,
    guards: Vec<Guard<S, P, D>>,
    actions: Vec<Action<S, P, D>>,
}

/// Source: a single state.
pub fn from<S, P, D>(state: S) -> SrcStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    SrcStub {
        src: RawSrc::One(state),
    }
}

/// Source: a set of states of the same machine.
pub fn from_set<S, P, D>(states: impl IntoIterator<Item = S>) -> SrcStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    SrcStub {
        src: RawSrc::Set(states.into_iter().collect()),
    }
}

/// Source: wildcard, any state of the owning machine.
pub fn from_any<S, P, D>() -> SrcStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    SrcStub {
        src: RawSrc::Wildcard,
    }
}

/// Source: the terminal (`Exit`) state of another machine, for a host
/// machine's transitions (scenario S5).
pub fn exit_of<M: Machine>() -> SrcStub<M::State, M::Payload, M::Data> {
    SrcStub {
        src: RawSrc::ExitOf(handle_of::<M>()),
    }
}

impl<S, P, D> SrcStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    pub fn on(self, event: P::Id) -> EventStub<S, P, D> {
        EventStub {
            src: self.src,
            event: RawEvent::One(EventTag::User(event)),
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn on_any_of(self, events: impl IntoIterator<Item = P::Id>) -> EventStub<S, P, D> {
        EventStub {
            src: self.src,
            event: RawEvent::Set(events.into_iter().map(EventTag::User).collect()),
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn on_any(self) -> EventStub<S, P, D> {
        EventStub {
            src: self.src,
            event: RawEvent::Wildcard,
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn on_enter(self) -> EventStub<S, P, D> {
        EventStub {
            src: self.src,
            event: RawEvent::One(EventTag::OnEnter),
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn on_exit(self) -> EventStub<S, P, D> {
        EventStub {
            src: self.src,
            event: RawEvent::One(EventTag::OnExit),
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl<S, P, D> EventStub<S, P, D>
where
    S: crate::ids::StateId,
    P: EventPayload,
{
    pub fn when<F>(mut self, guard: F) -> Self
    where
        F: Fn(crate::ids::Node<S>, &InEvent<'_, P>, &D) -> bool + Send + Sync + 'static,
    {
        self.guards.push(Box::new(guard));
        self
    }

    pub fn run<F>(mut self, action: F) -> Self
    where
        F: Fn(crate::ids::Node<S>, &InEvent<'_, P>, &mut D) + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    fn build(self, dst: RawDst<S, P, D>) -> TransitionSpec<S, P, D> {
        TransitionSpec {
            src: self.src,
            event: self.event,
            guards: self.guards,
            actions: self.actions,
            dst,
        }
    }

    pub fn to(self, state: S) -> TransitionSpec<S, P, D> {
        self.build(RawDst::To(state))
    }

    pub fn keep(self) -> TransitionSpec<S, P, D> {
        self.build(RawDst::Keep)
    }

    pub fn bypass(self) -> TransitionSpec<S, P, D> {
        self.build(RawDst::Bypass)
    }

    pub fn enter<M: Machine<State = S, Payload = P, Data = D>>(self) -> TransitionSpec<S, P, D> {
        let handle = handle_of::<M>();
        self.build(RawDst::Enter(handle))
    }

    pub fn exit(self) -> TransitionSpec<S, P, D> {
        self.build(RawDst::Exit)
    }
}
