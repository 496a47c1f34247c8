//! # Demo: orders
//!
//! Wires an emitter, a topic-scoped broker and an inline dispatcher, then
//! publishes a few orders.
//!
//! Shows how to:
//! - Implement the [`Handler`] trait for a stateful type.
//! - Mix persistent and one-shot handlers on one topic.
//! - Observe the fixed topic winning over the event's topic.
//! - Handle a failing handler at the publisher.
//!
//! ## Run
//! ```bash
//! RUST_LOG=topicvisor=trace cargo run --example orders
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use topicvisor::{
    Broker, Dispatch, Dispatcher, Emitter, Envelope, Event, Handler, HandlerError, HandlerFn,
    HandlerRef, Subscriber,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Order {
    id: u64,
    cents: u64,
}

type OrderEvent = Envelope<Order>;

/// Running revenue total; rejects empty orders.
#[derive(Default)]
struct Revenue {
    total: AtomicU64,
}

impl Handler<OrderEvent> for Revenue {
    fn execute(&self, ev: &OrderEvent) -> Result<(), HandlerError> {
        if ev.payload.cents == 0 {
            return Err(HandlerError::failed(format!("order {} is empty", ev.payload.id)));
        }
        self.total.fetch_add(ev.payload.cents, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "revenue"
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let emitter = Arc::new(Emitter::new());
    let orders: Broker<OrderEvent> = Broker::new(Arc::clone(&emitter), "orders");
    let revenue = Arc::new(Revenue::default());
    let revenue_handler: HandlerRef<OrderEvent> = revenue.clone();

    orders
        .add_handler(revenue_handler)
        .add_once(HandlerFn::arc("first-order", |ev: &OrderEvent| {
            println!("[first] order={} published on topic={}", ev.payload.id, ev.topic());
            Ok(())
        }));

    emitter.subscribe(Subscriber::new("audit").handle(HandlerFn::arc(
        "audit",
        |ev: &OrderEvent| {
            println!("[audit] seq={} order={:?}", ev.seq, ev.payload);
            Ok(())
        },
    )));

    let dispatcher = Dispatcher::new(&orders);
    let batch = [
        Envelope::new("orders", Order { id: 1, cents: 1_250 }),
        // fixed topic "orders" wins over "shipping"
        Envelope::new("shipping", Order { id: 2, cents: 800 }),
        Envelope::new("orders", Order { id: 3, cents: 0 }),
    ];
    for ev in &batch {
        if let Err(err) = dispatcher.dispatch(ev) {
            println!("[error] {} ({})", err, err.as_label());
        }
    }

    // the audit subscriber is only reachable on its own topic
    let unscoped = Broker::unscoped(Arc::clone(&emitter));
    if let Err(err) = unscoped.emit(&Envelope::new("audit", Order { id: 4, cents: 99 })) {
        println!("[error] {err}");
    }

    println!(
        "revenue={} topics={:?}",
        revenue.total.load(Ordering::Relaxed),
        emitter.topics()
    );
}
