//! State-machine runtime (spec component C5).

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::assembly::assemble;
use crate::dispatch::{Dispatcher, build_dispatcher};
use crate::error::AssemblyError;
use crate::ids::{EventTag, Node, StateId};
use crate::payload::{EventPayload, InEvent};
use crate::transition::Machine;

/// Owns the single piece of mutable engine state (`state_idx`) plus the
/// caller's own data `D`. Transition storage and dispatchers are built once
/// at construction and never mutated afterwards.
pub struct StateMachine<S: StateId, P: EventPayload, D> {
    global_states: Vec<(TypeId, Node<S>)>,
    dispatchers: HashMap<EventTag<P::Id>, Dispatcher<S, P, D>>,
    global_event_ids: HashSet<EventTag<P::Id>>,
    initial_index: usize,
    state_idx: usize,
    data: D,
}

impl<S: StateId, P: EventPayload, D> StateMachine<S, P, D> {
    /// Construct a runtime for root machine `R`, flattening it and every
    /// machine reachable through `Enter` (spec.md §4.1). `data` is the
    /// caller's own state, handed by reference to every guard/action call.
    pub fn new<R: Machine<State = S, Payload = P, Data = D>>(
        data: D,
    ) -> Result<Self, AssemblyError> {
        let assembled = assemble::<R>()?;

        let mut tags: HashSet<EventTag<P::Id>> = assembled.global_event_ids.clone();
        tags.insert(EventTag::OnEnter);
        tags.insert(EventTag::OnExit);

        let dispatchers = tags
            .into_iter()
            .map(|tag| (tag, build_dispatcher(&assembled, tag)))
            .collect();

        Ok(Self {
            global_states: assembled.global_states,
            dispatchers,
            global_event_ids: assembled.global_event_ids,
            initial_index: assembled.initial_index,
            state_idx: assembled.initial_index,
            data,
        })
    }

    /// Deliver `OnEnter` to the current (initial) state exactly once.
    pub fn begin(&mut self) {
        self.dispatch_and_apply(EventTag::OnEnter, InEvent::OnEnter);
    }

    /// Feed one user event. Returns `true` iff some transition matched (a
    /// pure `Bypass` chain does not count, per spec.md §4.2/§4.3).
    pub fn feed(&mut self, event: P) -> bool {
        let tag = EventTag::User(event.event_id());
        if !self.global_event_ids.contains(&tag) {
            return false;
        }
        self.dispatch_and_apply(tag, InEvent::User(&event))
    }

    /// `state_idx == index_of((M, state))`.
    pub fn is<M: Machine<State = S>>(&self, state: S) -> bool {
        self.global_states[self.state_idx] == (TypeId::of::<M>(), Node::Id(state))
    }

    /// `state_idx := initial`. Delivers no `OnEnter`/`OnExit`.
    pub fn reset(&mut self) {
        self.state_idx = self.initial_index;
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    fn dispatch_and_apply(&mut self, tag: EventTag<P::Id>, ev: InEvent<'_, P>) -> bool {
        let next = match self.dispatchers.get(&tag) {
            None => return false,
            Some(dispatcher) => {
                dispatcher.dispatch(self.state_idx, &self.global_states, &ev, &mut self.data)
            }
        };
        match next {
            None => false,
            Some(idx) if idx == self.state_idx => true,
            Some(idx) => {
                debug!(from = self.state_idx, to = idx, ?tag, "state change");
                self.dispatch_and_apply(EventTag::OnExit, InEvent::OnExit);
                self.state_idx = idx;
                self.dispatch_and_apply(EventTag::OnEnter, InEvent::OnEnter);
                true
            }
        }
    }
}
