//! Graph From Configuration
//!
//! This demo loads a transition tree from JSON and inspects it.
//!
//! Key concepts:
//! - Declarative graphs loaded with serde
//! - A `next` entry may be one state, one subtree, or a list of either
//! - Validation that reports every problem at once
//! - Plain `String` states, no enum needed
//!
//! Run with: cargo run --example config_graph

use waypoint::graph::{ConfigError, GraphConfig, StateGraph};

const ORDER_GRAPH: &str = r#"{
    "root": {
        "state": "CREATED",
        "next": [
            {
                "state": "PROCESSING",
                "next": [
                    { "state": "SHIPPED", "next": "DELIVERED" },
                    "CANCELLED"
                ]
            },
            "CANCELLED"
        ]
    },
    "manual": ["CANCELLED"],
    "strict": true
}"#;

const BROKEN_GRAPH: &str = r#"{
    "root": { "state": "A->B", "next": "DONE" },
    "manual": ["ARCHIVED"]
}"#;

fn main() -> Result<(), ConfigError> {
    println!("=== Graph From Configuration ===\n");

    let graph = StateGraph::try_new(GraphConfig::<String>::from_json(ORDER_GRAPH)?)?;

    println!("Diagram:{}\n", graph.diagram());

    println!("States in declaration order:");
    for state in graph.states() {
        let kind = if graph.is_final_state(state) {
            "final"
        } else if graph.is_manual(state) {
            "manual"
        } else {
            "automatic"
        };
        println!("  {} ({})", state, kind);
    }
    println!();

    let from = "CREATED".to_string();
    let to = "DELIVERED".to_string();
    match graph.transitions(&from, &to) {
        Ok(path) => println!("Route {} -> {}: {}", from, to, path.join(", ")),
        Err(e) => println!("Route failed: {}", e),
    }

    let back = "CREATED".to_string();
    match graph.transitions(&to, &back) {
        Ok(path) => println!("Route {} -> {}: {:?}", to, back, path),
        Err(e) => println!("Route failed: {}", e),
    }
    println!();

    println!("Loading a broken configuration:");
    let broken = GraphConfig::<String>::from_json(BROKEN_GRAPH)?;
    match StateGraph::try_new(broken) {
        Ok(_) => println!("  Unexpectedly valid"),
        Err(e) => println!("  {}", e),
    }

    Ok(())
}
