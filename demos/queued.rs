//! # Demo: queued
//!
//! Producers hand events to a [`QueuedDispatcher`]; a tokio worker emits them in
//! FIFO order. Shows overflow rejection and a graceful drain on shutdown.
//!
//! ## Run
//! ```bash
//! RUST_LOG=topicvisor=debug cargo run --example queued
//! ```

use std::sync::Arc;

use topicvisor::{Broker, BrokerError, Config, Dispatch, Emitter, Envelope, HandlerFn, QueuedDispatcher};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let broker = Broker::new(Arc::new(Emitter::new()), "jobs");
    broker.add_handler(HandlerFn::arc("worker", |ev: &Envelope<String>| {
        println!("[job] seq={} {}", ev.seq, ev.payload);
        Ok(())
    }));

    let cfg = Config {
        queue_capacity: 4,
        ..Config::default()
    };
    let queued = QueuedDispatcher::new(broker, &cfg);

    // current_thread: nothing is drained until we yield, so the 5th job overflows
    for n in 1..=5 {
        match queued.dispatch(&Envelope::new("jobs", format!("job #{n}"))) {
            Ok(_) => {}
            Err(BrokerError::QueueFull { .. }) => println!("[dropped] job #{n}: queue full"),
            Err(err) => println!("[error] {err}"),
        }
    }
    println!("pending={}", queued.pending());

    queued.shutdown().await;
    println!("drained");
}
