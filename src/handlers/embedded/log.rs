//! # LogHandler: simple event writer
//!
//! A minimal handler that writes every event it receives through `tracing` at
//! `INFO` level. Use it for tests, demos, or as a catch-all audit trail.
//!
//! ## Example output (with `tracing-subscriber` fmt layer)
//! ```text
//! INFO topicvisor::handlers::embedded::log: event topic="orders" seq=7 kind="topicvisor::events::event::Envelope<orders::OrderPlaced>"
//! ```
//!
//! `seq` is omitted for events that don't carry one (see [`Event::seq`]).

use tracing::info;

use crate::error::HandlerError;
use crate::events::Event;
use crate::handlers::Handler;

/// Event writer handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl LogHandler {
    /// Construct a new [`LogHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<E: Event> Handler<E> for LogHandler {
    fn execute(&self, event: &E) -> Result<(), HandlerError> {
        let kind = std::any::type_name::<E>();
        info!(topic = event.topic(), seq = event.seq(), kind, "event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogHandler"
    }
}
