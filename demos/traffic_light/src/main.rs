//! # Basic Transitions: a Single Flat Machine
//!
//! This walkthrough builds the simplest machine the engine supports: one
//! set of states, one event id, no submachines. It is the right place to
//! start before looking at `spacecraft`, which adds hierarchy.
//!
//! ## The mental model
//!
//! A machine is a zero-sized type implementing `Machine`: it names its
//! state/payload/data types, its initial state, and a list of transitions
//! built with the method-chain builder (`from(..).on(..)...to(..)`).
//! `StateMachine::new::<M>(data)` flattens that (and anything it `Enter`s)
//! into dispatch tables once; `feed` walks those tables afterwards, it does
//! not re-walk the transition list.
//!
//! ## Caveat: guards run in declared order, first match wins
//!
//! `TrafficLight` below declares a maintenance override *before* the normal
//! cycle transition at `Red`. When `maintenance` is set, the override's
//! guard passes and the normal transition is never even reached for that
//! event - not because it was skipped, but because dispatch already
//! committed to the first transition whose guard chain passed.

use hfsm::core::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum Light {
    Red,
    Green,
    Yellow,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum EventId {
    Advance,
    Tick,
}

enum Event {
    Advance,
    Tick,
}

impl EventPayload for Event {
    type Id = EventId;
    fn event_id(&self) -> EventId {
        match self {
            Event::Advance => EventId::Advance,
            Event::Tick => EventId::Tick,
        }
    }
}

struct Dashboard {
    maintenance: bool,
    ticks: u64,
    cycles: u64,
}

struct TrafficLight;

impl Machine for TrafficLight {
    type State = Light;
    type Payload = Event;
    type Data = Dashboard;
    const INITIAL: Light = Light::Red;

    fn transitions() -> Vec<TransitionSpec<Light, Event, Dashboard>> {
        vec![
            // Maintenance override: declared first, so it wins whenever its
            // guard passes, regardless of where the light currently sits.
            from_any()
                .on(EventId::Advance)
                .when(|_src, _ev, d: &Dashboard| d.maintenance)
                .keep(),
            from(Light::Red).on(EventId::Advance).to(Light::Green),
            from(Light::Green).on(EventId::Advance).to(Light::Yellow),
            from(Light::Yellow)
                .on(EventId::Advance)
                .run(|_src, _ev, d: &mut Dashboard| d.cycles += 1)
                .to(Light::Red),
            // `Tick` never commits to a new state; it only counts.
            from_any()
                .on(EventId::Tick)
                .run(|_src, _ev, d: &mut Dashboard| d.ticks += 1)
                .keep(),
        ]
    }
}

fn label(light: &StateMachine<Light, Event, Dashboard>) -> &'static str {
    if light.is::<TrafficLight>(Light::Red) {
        "Red"
    } else if light.is::<TrafficLight>(Light::Green) {
        "Green"
    } else {
        "Yellow"
    }
}

fn main() {
    tracing_subscriber::fmt::try_init().ok();

    let mut light = StateMachine::new::<TrafficLight>(Dashboard {
        maintenance: false,
        ticks: 0,
        cycles: 0,
    })
    .expect("flat machine assembly cannot fail");
    light.begin();

    println!("=== Normal Cycling ===");
    println!("Starting state: {}", label(&light));

    for _ in 0..4 {
        light.feed(Event::Advance);
        println!("-> {}", label(&light));
    }
    println!("Completed cycles: {}\n", light.data().cycles);

    println!("=== Wildcard Tick Counter ===");
    println!("Ticks are counted from any state without changing it.");
    for _ in 0..3 {
        light.feed(Event::Tick);
    }
    println!("Ticks so far: {} (still at {})\n", light.data().ticks, label(&light));

    println!("=== Maintenance Override ===");
    light.data_mut().maintenance = true;
    let before = label(&light);
    light.feed(Event::Advance);
    println!(
        "With maintenance set, Advance keeps {} at {} instead of cycling",
        before,
        label(&light)
    );

    println!("\n=== Reset ===");
    light.reset();
    println!(
        "After reset: {} (back to the root's initial state; `data` is untouched: {} ticks recorded)",
        label(&light),
        light.data().ticks
    );
}
