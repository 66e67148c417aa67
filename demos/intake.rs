//! Game-Piece Intake
//!
//! This example drives an intake behaviour through the periodic command
//! adapter, the way a robot's scheduler would.
//!
//! Key concepts:
//! - Guards closing over simulated sensor and driver input
//! - Priorities: an eject request preempts every other transition
//! - Time-in-state guards for a timed spit-out
//! - Graphviz export of the transition graph
//!
//! Run with: cargo run --example intake

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tickstate::core::{Clock, Hooks, ManualClock, DEFAULT_TICK_PERIOD};
use tickstate::telemetry::MemorySink;
use tickstate::{
    state_enum, Command, MachineConfig, StateMachineBuilder, StateMachineCommand, Transition,
};

state_enum! {
    enum Intake {
        Idle,
        Collecting,
        Holding,
        Ejecting,
    }
}

#[derive(Default)]
struct Inputs {
    intake_button: Cell<bool>,
    eject_button: Cell<bool>,
    beam_break: Cell<bool>,
    roller_speed: Cell<f64>,
    eject_started: Cell<Duration>,
}

const EJECT_TIME: Duration = Duration::from_millis(500);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Game-Piece Intake ===\n");

    let inputs = Rc::new(Inputs::default());
    let clock = ManualClock::new();
    let sink = MemorySink::new();
    let config =
        MachineConfig::from_json(r#"{ "label": "Robot/Intake", "history_capacity": 8 }"#)?;

    let rollers = |speed: f64| {
        let inputs = Rc::clone(&inputs);
        move || inputs.roller_speed.set(speed)
    };

    let mut machine = StateMachineBuilder::from_config(&config)
        .initial(Intake::Idle)
        .hooks(Intake::Idle, Hooks::new().on_enter(rollers(0.0)))
        .hooks(Intake::Collecting, Hooks::new().on_enter(rollers(0.8)))
        .hooks(Intake::Holding, Hooks::new().on_enter(rollers(0.05)))
        .hooks(Intake::Ejecting, {
            let spin = rollers(-1.0);
            let (i, c) = (Rc::clone(&inputs), clock.clone());
            Hooks::new().on_enter(move || {
                spin();
                i.eject_started.set(c.now());
            })
        })
        .clock(clock.clone())
        .sink(sink.clone())
        .build()?;

    let i = Rc::clone(&inputs);
    machine.add_transition(Transition::new(
        Intake::Idle,
        Intake::Collecting,
        move || i.intake_button.get(),
        1,
    ));
    let i = Rc::clone(&inputs);
    machine.add_transition(Transition::new(
        Intake::Collecting,
        Intake::Holding,
        move || i.beam_break.get(),
        2,
    ));
    let i = Rc::clone(&inputs);
    machine.add_transition(Transition::new(
        Intake::Collecting,
        Intake::Idle,
        move || !i.intake_button.get(),
        1,
    ));
    for from in [Intake::Idle, Intake::Collecting, Intake::Holding] {
        let i = Rc::clone(&inputs);
        machine.add_transition(Transition::new(
            from,
            Intake::Ejecting,
            move || i.eject_button.get(),
            10,
        ));
    }

    let (i, c) = (Rc::clone(&inputs), clock.clone());
    machine.add_transition(Transition::new(
        Intake::Ejecting,
        Intake::Idle,
        move || c.now().saturating_sub(i.eject_started.get()) >= EJECT_TIME,
        0,
    ));

    println!("{}", machine.to_dot("Intake"));

    let mut command = StateMachineCommand::new(machine);
    command.initialize();

    let script: [(u32, fn(&Inputs)); 4] = [
        (2, |i| i.intake_button.set(true)),
        (6, |i| i.beam_break.set(true)),
        (9, |i| {
            i.intake_button.set(false);
            i.eject_button.set(true);
        }),
        (10, |i| {
            i.eject_button.set(false);
            i.beam_break.set(false);
        }),
    ];

    for tick in 0..40u32 {
        for (at, action) in &script {
            if *at == tick {
                action(&inputs);
            }
        }

        clock.advance(DEFAULT_TICK_PERIOD);
        command.execute();

        println!(
            "tick {tick:>2}: {:<10} {:>5.2}s  rollers {:+.2}",
            format!("{:?}", command.machine().state()),
            command.machine().time_in_state().as_secs_f64(),
            inputs.roller_speed.get()
        );
    }

    command.end(true);
    let machine = command.into_inner();

    println!("\nState changes:");
    for change in machine.history().changes() {
        println!(
            "  {:?} -> {:?} after {:.2}s",
            change.from,
            change.to,
            change.time_in_previous.as_secs_f64()
        );
    }
    println!("\nTelemetry records published: {}", sink.len());

    println!("\n=== Example Complete ===");
    Ok(())
}
