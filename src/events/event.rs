//! # Events published through the broker.
//!
//! [`Event`] is the only capability the messaging layer needs from a published
//! value: a pure accessor for its topic. Everything else is payload that handlers
//! interpret on their own.
//!
//! [`Envelope`] is the ready-made carrier: an immutable topic, an opaque payload and
//! ordering metadata.
//!
//! ## Ordering guarantees
//! Each envelope has a process-wide unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore creation order when events are delivered
//! out of order (e.g. through a queued dispatcher).
//!
//! ## Example
//! ```rust
//! use topicvisor::{Envelope, Event};
//!
//! let ev = Envelope::new("shipping", 42u32);
//!
//! assert_eq!(ev.topic(), "shipping");
//! assert_eq!(ev.payload, 42);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for envelope ordering.
static ENVELOPE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Anything that can be published through an [`Emitter`](crate::Emitter).
///
/// The topic must not change for the lifetime of the value; the broker may call
/// [`Event::topic`] at any time to route it.
pub trait Event: Send + Sync + 'static {
    /// Topic this event belongs to.
    fn topic(&self) -> &str;

    /// Ordering sequence, for carriers that assign one.
    fn seq(&self) -> Option<u64> {
        None
    }
}

/// Topic-tagged payload carrier.
///
/// - `topic`: fixed at construction, read through [`Event::topic`]
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
#[derive(Clone, Debug)]
pub struct Envelope<P> {
    topic: Arc<str>,
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Domain data; opaque to the messaging layer.
    pub payload: P,
}

impl<P> Envelope<P> {
    /// Creates a new envelope with current timestamp and next sequence number.
    pub fn new(topic: impl Into<Arc<str>>, payload: P) -> Self {
        Self {
            topic: topic.into(),
            seq: ENVELOPE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            payload,
        }
    }

    /// Shared handle to the topic string.
    #[inline]
    pub fn topic_arc(&self) -> Arc<str> {
        Arc::clone(&self.topic)
    }

    /// Consumes the envelope, returning the payload.
    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: Send + Sync + 'static> Event for Envelope<P> {
    #[inline]
    fn topic(&self) -> &str {
        &self.topic
    }

    #[inline]
    fn seq(&self) -> Option<u64> {
        Some(self.seq)
    }
}
