//! Traffic Light State Machine
//!
//! This example drives a cyclic graph through a transition manager.
//!
//! Key concepts:
//! - Cyclic graphs (traversal stops at the back-edge)
//! - Handlers taken from the current state context
//! - Rejected jumps reported on the error channel
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use statepath::events::{Channel, EventDispatcher, MachineEvent};
use statepath::{graph, TransitionManager, VertexFields};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let graph = graph! {
        "Red" => "Stop"; ["Green"],
        "Green" => "Go"; ["Yellow"],
        "Yellow" => "Caution"; ["Red"],
    };

    let dispatcher: Rc<EventDispatcher<&'static str, u32>> = Rc::new(EventDispatcher::new());
    dispatcher.subscribe(Channel::Transition, |event| {
        if let MachineEvent::Transition { from, to, input } = event {
            println!("  tick {input}: {from} -> {to}");
        }
    });
    dispatcher.subscribe(Channel::Error, |event| {
        if let MachineEvent::Error { message } = event {
            println!("  rejected: {message}");
        }
    });

    let manager: TransitionManager<_, _, u32> =
        match TransitionManager::builder(graph, VertexFields::new("Red"))
            .notifier(Rc::clone(&dispatcher))
            .build()
        {
            Ok(manager) => manager,
            Err(err) => {
                eprintln!("failed to build traffic light: {err}");
                return;
            }
        };

    println!("Discovered edges:");
    for (from, to) in manager.traverse() {
        println!("  {from} -> {to}");
    }

    println!("\nInitial state: {}\n", manager.state_context().state);

    println!("Cycling:");
    for tick in 1..=6 {
        let context = manager.state_context();
        if let Some(handler) = context.transitions().iter().next() {
            let _ = handler.invoke(tick);
        }
    }

    println!("\nJumping straight from {} to Yellow:", manager.current());
    let _ = manager.transition(&"Yellow", 7);

    if let Some(history) = manager.history() {
        println!("\nVisited {} states", history.path().len());
    }

    println!("\n=== Example Complete ===");
}
