//! # Dispatch capability
//!
//! [`Dispatch`] is the seam between producers and the broker. Producers hold a
//! `D: Dispatch<E>` and never learn whether delivery happens inline
//! ([`Dispatcher`](crate::Dispatcher)) or on a worker
//! ([`QueuedDispatcher`](crate::QueuedDispatcher)).
//!
//! ```rust
//! use std::sync::Arc;
//! use topicvisor::{Broker, BrokerError, Dispatch, Dispatcher, Emitter, Envelope};
//!
//! fn place_order<D: Dispatch<Envelope<u64>>>(d: &D, id: u64) -> Result<(), BrokerError> {
//!     d.dispatch(&Envelope::new("orders", id))?;
//!     Ok(())
//! }
//!
//! let broker = Broker::new(Arc::new(Emitter::new()), "orders");
//! place_order(&Dispatcher::new(&broker), 7)?;
//! # Ok::<(), BrokerError>(())
//! ```

use crate::error::BrokerError;
use crate::events::Event;

/// Strategy for handing an event to a broker.
pub trait Dispatch<E: Event> {
    /// Hands `event` over for delivery and returns `self` for chaining.
    ///
    /// Inline strategies surface handler failures here; deferred strategies only
    /// report whether the event was accepted.
    fn dispatch(&self, event: &E) -> Result<&Self, BrokerError>;
}
