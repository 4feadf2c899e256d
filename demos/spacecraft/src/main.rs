//! # Hierarchical States: a Submachine as a Capability Group
//!
//! `basic_transitions`/`traffic_light` builds a single flat machine. This
//! walkthrough adds hierarchy: a life-support subsystem that cycles through
//! its own modes independently of the spacecraft's own Docked/Cruising
//! states, entered and exited as a unit.
//!
//! ## The problem a submachine solves
//!
//! Life support has three active modes - O2Generation, CO2Scrubbing,
//! PressureRegulation - and needs one emergency shutdown that works from
//! *any* of them. Without grouping, that is three near-duplicate
//! transitions, one per mode. Declaring the three modes as one machine and
//! putting a wildcard transition on that machine gets the same effect:
//! `from_any()` only ever sees states that machine itself declared
//! (wildcard locality), so the shutdown transition reads as one rule
//! instead of three.
//!
//! ## Crossing the boundary
//!
//! `Spacecraft::Docked` enters `LifeSupport` on `Launch`; when `LifeSupport`
//! runs its own emergency-shutdown transition it does not know or care what
//! it is nested inside, it just `Exit`s. The outer machine is the one that
//! reacts to that exit, via `exit_of::<LifeSupport>().on_enter().to(..)`,
//! which fires on the synthetic `OnEnter` delivered to the reserved
//! terminal state the moment `LifeSupport` exits.

use hfsm::core::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum State {
    Docked,
    Cruising,
    O2Generation,
    Co2Scrubbing,
    PressureRegulation,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum EventId {
    Launch,
    Next,
    EmergencyShutdown,
    Dock,
}

enum Event {
    Launch,
    Next,
    EmergencyShutdown,
    Dock,
}

impl EventPayload for Event {
    type Id = EventId;
    fn event_id(&self) -> EventId {
        match self {
            Event::Launch => EventId::Launch,
            Event::Next => EventId::Next,
            Event::EmergencyShutdown => EventId::EmergencyShutdown,
            Event::Dock => EventId::Dock,
        }
    }
}

struct Log {
    lines: Vec<String>,
}

impl Log {
    fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// Cycles O2Generation -> CO2Scrubbing -> PressureRegulation -> ..., with a
/// single wildcard shutdown reachable from any of the three.
struct LifeSupport;

impl Machine for LifeSupport {
    type State = State;
    type Payload = Event;
    type Data = Log;
    const INITIAL: State = State::O2Generation;

    fn transitions() -> Vec<TransitionSpec<State, Event, Log>> {
        vec![
            from(State::O2Generation)
                .on(EventId::Next)
                .run(|_s, _e, log: &mut Log| log.record("life support: O2Generation -> CO2Scrubbing"))
                .to(State::Co2Scrubbing),
            from(State::Co2Scrubbing)
                .on(EventId::Next)
                .run(|_s, _e, log: &mut Log| log.record("life support: CO2Scrubbing -> PressureRegulation"))
                .to(State::PressureRegulation),
            from(State::PressureRegulation)
                .on(EventId::Next)
                .run(|_s, _e, log: &mut Log| log.record("life support: PressureRegulation -> O2Generation"))
                .to(State::O2Generation),
            from_any()
                .on(EventId::EmergencyShutdown)
                .run(|_s, _e, log: &mut Log| log.record("life support: EMERGENCY SHUTDOWN"))
                .exit(),
        ]
    }
}

struct Spacecraft;

impl Machine for Spacecraft {
    type State = State;
    type Payload = Event;
    type Data = Log;
    const INITIAL: State = State::Docked;

    fn transitions() -> Vec<TransitionSpec<State, Event, Log>> {
        vec![
            from(State::Docked)
                .on(EventId::Launch)
                .run(|_s, _e, log: &mut Log| log.record("spacecraft: launching, entering life support"))
                .enter::<LifeSupport>(),
            exit_of::<LifeSupport>()
                .on_enter()
                .run(|_s, _e, log: &mut Log| log.record("spacecraft: life support exited, returning to dock"))
                .to(State::Docked),
        ]
    }
}

fn describe(sm: &StateMachine<State, Event, Log>) -> &'static str {
    for (machine, state) in [
        ("Spacecraft::Docked", State::Docked),
        ("Spacecraft::Cruising", State::Cruising),
        ("LifeSupport::O2Generation", State::O2Generation),
        ("LifeSupport::CO2Scrubbing", State::Co2Scrubbing),
        ("LifeSupport::PressureRegulation", State::PressureRegulation),
    ] {
        let is_spacecraft = matches!(state, State::Docked | State::Cruising);
        let matched = if is_spacecraft {
            sm.is::<Spacecraft>(state)
        } else {
            sm.is::<LifeSupport>(state)
        };
        if matched {
            return machine;
        }
    }
    "unknown"
}

fn main() {
    tracing_subscriber::fmt::try_init().ok();

    let mut sm = StateMachine::new::<Spacecraft>(Log { lines: Vec::new() })
        .expect("spacecraft/life-support assembly cannot fail");
    sm.begin();

    println!("=== Entering a Submachine ===");
    println!("Starting: {}", describe(&sm));
    sm.feed(Event::Launch);
    println!("After Launch: {}", describe(&sm));

    println!("\n=== Cycling Inside the Submachine ===");
    for _ in 0..3 {
        sm.feed(Event::Next);
        println!("-> {}", describe(&sm));
    }

    println!("\n=== An Event Nobody Declared ===");
    println!("Dock is not on any transition in Spacecraft or LifeSupport,");
    println!("so feeding it is rejected before dispatch even runs:");
    let moved = sm.feed(Event::Dock);
    println!("Dock matched a transition: {moved} (still {})", describe(&sm));

    println!("\n=== Emergency Shutdown: Exiting the Submachine ===");
    sm.feed(Event::EmergencyShutdown);
    println!("After shutdown: {}", describe(&sm));

    println!("\n=== Full Action Log ===");
    for line in &sm.data().lines {
        println!("  {line}");
    }
}
