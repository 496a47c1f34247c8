//! # Event handlers.
//!
//! This module provides the [`Handler`] trait and its ready-made forms.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Broker::emit(&E) ──► Emitter::emit(topic, &E) ──► snapshot of entries for topic
//!                                                        │
//!                                                        ├──► Handler::execute(&E)   (persistent)
//!                                                        ├──► Handler::execute(&E)   (once → removed)
//!                                                        └──► ...                    (registration order)
//! ```
//!
//! ## Handler types
//! - **Plain handlers**: any type implementing [`Handler`], or a closure via [`HandlerFn`]
//! - **Topic-aware handlers**: [`Subscriber`], which must be specialized before use
//!
//! ## Implementing custom handlers
//! ```rust
//! use topicvisor::{Envelope, Handler, HandlerError};
//!
//! struct Metrics;
//!
//! impl Handler<Envelope<u64>> for Metrics {
//!     fn execute(&self, ev: &Envelope<u64>) -> Result<(), HandlerError> {
//!         if ev.payload > 1_000 {
//!             // record large order...
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "metrics"
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod handler;
mod subscriber;

#[cfg(feature = "logging")]
pub use embedded::LogHandler;
pub use handler::{Handler, HandlerFn, HandlerRef};
pub use subscriber::Subscriber;
