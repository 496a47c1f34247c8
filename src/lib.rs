//! # topicvisor
//!
//! **Topicvisor** is a small, synchronous, in-process publish/subscribe library.
//!
//! A [`Broker`] binds a logical topic to an [`Emitter`]. Producers publish typed
//! [`Event`]s through it; consumers register [`Handler`]s that react to them. A
//! [`Dispatch`] strategy sits in front of the broker so producers don't care
//! whether delivery happens inline or on a worker.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Producer A  │   │  Producer B  │   │  Producer C  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐          │
//!     │  Dispatcher  │   │QueuedDispatch│          │ (direct)
//!     │   (inline)   │   │ (tokio queue)│          │
//!     └──────┬───────┘   └──────┬───────┘          │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Broker (fixed topic, or the event's own topic when unscoped)     │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter: topic → [entry, entry, ...]   (persistent | once)       │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   handler1.execute  handler2.execute  handlerN.execute   (registration order,
//!                                                          caller's stack)
//! ```
//!
//! ### Emit pass
//! ```text
//! Broker::emit(&ev)
//!   ├─► topic = fixed topic if non-empty, else ev.topic()
//!   └─► Emitter::emit(topic, &ev)
//!         ├─► no entries          ─► Ok (no-op)
//!         ├─► snapshot entries (handlers added during the pass wait for the next one)
//!         └─► for each entry:
//!               ├─ once ─► removed right before it runs
//!               ├─ Ok   ─► next
//!               └─ Err  ─► abort pass, return BrokerError::Handler
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                        |
//! |-------------------|------------------------------------------------------------|-------------------------------------------|
//! | **Events**        | Topic accessor and a ready-made payload carrier.           | [`Event`], [`Envelope`]                   |
//! | **Handlers**      | React to events; closures or topic-bound subscribers.      | [`Handler`], [`HandlerFn`], [`Subscriber`] |
//! | **Core**          | Registry, emit pass, topic scoping.                        | [`Emitter`], [`Broker`]                   |
//! | **Dispatch**      | Inline or queued hand-off to a broker.                     | [`Dispatch`], [`Dispatcher`], [`QueuedDispatcher`] |
//! | **Errors**        | Typed errors for handlers and publishers.                  | [`HandlerError`], [`BrokerError`]         |
//! | **Configuration** | Listener limit and queue capacity.                         | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogHandler`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use topicvisor::{Broker, Dispatch, Dispatcher, Emitter, Envelope, HandlerError, HandlerFn};
//!
//! #[derive(Debug)]
//! struct OrderPlaced {
//!     id: u64,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter = Arc::new(Emitter::new());
//!     let orders = Broker::new(Arc::clone(&emitter), "orders");
//!
//!     orders
//!         .add_handler(HandlerFn::arc("billing", |ev: &Envelope<OrderPlaced>| {
//!             println!("bill order {}", ev.payload.id);
//!             Ok(())
//!         }))
//!         .add_once(HandlerFn::arc("welcome", |ev: &Envelope<OrderPlaced>| {
//!             if ev.payload.id == 0 {
//!                 return Err(HandlerError::failed("order id must be non-zero"));
//!             }
//!             println!("first order ever: {}", ev.payload.id);
//!             Ok(())
//!         }));
//!
//!     let dispatcher = Dispatcher::new(&orders);
//!     dispatcher
//!         .dispatch(&Envelope::new("orders", OrderPlaced { id: 1 }))?
//!         .dispatch(&Envelope::new("orders", OrderPlaced { id: 2 }))?;
//!
//!     assert_eq!(emitter.listener_count("orders"), 1);
//!     Ok(())
//! }
//! ```
mod core;
mod dispatchers;
mod error;
mod events;
mod handlers;

#[cfg(test)]
mod trace_capture;

// ---- Public re-exports ----

pub use core::{Broker, Config, Emitter};
pub use dispatchers::{Dispatch, Dispatcher, QueuedDispatcher};
pub use error::{BrokerError, HandlerError};
pub use events::{Envelope, Event};
pub use handlers::{Handler, HandlerFn, HandlerRef, Subscriber};

// Optional: expose a simple built-in logging handler (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use handlers::LogHandler;
