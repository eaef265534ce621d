//! Order Fulfillment
//!
//! This demo walks an order through its lifecycle with guarded edges.
//!
//! Key concepts:
//! - Shortest-path routing (Pending -> Fulfilled crosses every step)
//! - Async guards that may veto an edge or adjust the entity
//! - Manual states that `next` never selects
//! - Strict graphs rejecting unreachable targets
//!
//! Run with: cargo run --example order_fulfillment

use async_trait::async_trait;
use waypoint::builder::StateMachineBuilder;
use waypoint::entity::Stateful;
use waypoint::graph::GraphConfig;
use waypoint::guard::guard_fn;
use waypoint::{state_enum, transitions, GuardError, TransitionGuard};

state_enum! {
    enum OrderStatus {
        Pending = "pending",
        Processed = "processed",
        Synchronized = "synchronized",
        Fulfilled = "fulfilled",
        Failed = "failed",
        Cancelled = "cancelled",
    }
}

use OrderStatus::*;

// Order entity
struct Order {
    id: u64,
    status: OrderStatus,
    total: f64,
    warehouse_ref: Option<String>,
}

impl Stateful for Order {
    type State = OrderStatus;

    fn state(&self) -> &OrderStatus {
        &self.status
    }

    fn set_state(&mut self, state: OrderStatus) {
        self.status = state;
    }
}

// Stands in for a call to a warehouse API
struct WarehouseSync;

#[async_trait]
impl TransitionGuard<Order> for WarehouseSync {
    async fn can_transition(&self, order: &mut Order) -> Result<(), GuardError> {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let reference = format!("WH-{}", order.id * 10);
        println!("  [Warehouse] Registered order {} as {}", order.id, reference);
        order.warehouse_ref = Some(reference);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("=== Order Fulfillment ===\n");

    let graph = GraphConfig::new(transitions! {
        Pending => [
            Processed => [
                Synchronized => [
                    Fulfilled,
                    Failed => [Fulfilled],
                    Cancelled,
                ],
                Cancelled,
            ],
            Cancelled,
        ]
    })
    .manual([Failed, Cancelled])
    .strict(true);

    let machine = StateMachineBuilder::<Order, OrderStatus>::new()
        .graph(graph)
        .stateful()
        .guard(
            Pending,
            Processed,
            guard_fn(|order: &mut Order| -> Result<(), GuardError> {
                if order.total > 0.0 {
                    Ok(())
                } else {
                    Err(format!("order {} has nothing to charge", order.id).into())
                }
            }),
        )?
        .guard(Processed, Synchronized, WarehouseSync)?
        .build()?;

    println!("Transition graph:{}\n", machine.graph().diagram());

    // Happy path: one call crosses every edge
    let mut order = Order {
        id: 12345,
        status: Pending,
        total: 149.99,
        warehouse_ref: None,
    };

    println!("Step 1: Fulfil order {}", order.id);
    let history = machine.transition(&mut order, &Fulfilled).await?;
    let path: Vec<String> = history.get_path().iter().map(|s| s.to_string()).collect();
    println!("  Path: {}", path.join(" -> "));
    println!("  Warehouse ref: {:?}", order.warehouse_ref);
    println!("  Final state reached: {}\n", machine.is_final(&order));

    // Guard veto: the order stays where it was
    let mut empty = Order {
        id: 67890,
        status: Pending,
        total: 0.0,
        warehouse_ref: None,
    };

    println!("Step 2: Try to fulfil empty order {}", empty.id);
    match machine.transition(&mut empty, &Fulfilled).await {
        Ok(_) => println!("  Unexpected success"),
        Err(e) => println!("  Rejected: {}", e),
    }
    println!("  Status remains: {}\n", empty.status);

    // Manual states are only reached on request
    let mut manual = Order {
        id: 24680,
        status: Synchronized,
        total: 20.0,
        warehouse_ref: Some("WH-1".to_string()),
    };

    println!("Step 3: Step order {} forward", manual.id);
    let next = machine.next(&mut manual).await?;
    println!("  next() chose: {}", next);
    println!("  Manual options skipped: failed, cancelled\n");

    // Strict graphs refuse to go backwards
    println!("Step 4: Move a fulfilled order back to pending");
    if let Err(e) = machine.transition(&mut order, &Pending).await {
        println!("  Error: {}", e);
    }

    println!("\nKey Takeaways:");
    println!("- Paths are computed, callers only name the destination");
    println!("- Guards run in path order and stop the walk on failure");
    println!("- Manual states are never picked by next()");

    Ok(())
}
