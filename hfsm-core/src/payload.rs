//! Splits an event's routing identity from the data it carries.
//!
//! A user event enum such as `enum CalcEvent { Digit(char), Clear }` cannot
//! serve directly as a dispatch key: two `Digit` values with different
//! `char`s would compare unequal, breaking set/wildcard membership checks
//! that must only look at *which variant* fired. `EventPayload::event_id`
//! is the discriminant-only projection used for routing; the full value is
//! what guards and actions receive.

use crate::ids::EventId;

/// Implemented by the user's event type. `Id` is a small `Copy` enum
/// carrying one variant per event kind; `event_id` maps a concrete value to
/// its kind.
pub trait EventPayload: Send + Sync + 'static {
    type Id: EventId;

    fn event_id(&self) -> Self::Id;
}

/// What a guard or action actually receives: the concrete payload for a
/// user-fed event, or a marker for the synthesized `OnEnter`/`OnExit`
/// pseudo-events (which never carry payload).
pub enum InEvent<'a, P> {
    User(&'a P),
    OnEnter,
    OnExit,
}
