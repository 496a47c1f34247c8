//! # Topic-scoped façade over a shared emitter.
//!
//! A [`Broker`] pairs an [`Emitter`] handle with an optional fixed topic.
//!
//! ## Topic resolution
//! ```text
//! emit(&ev):        topic = fixed topic if non-empty, else ev.topic()
//! add_handler(h):   topic = fixed topic, always (even when empty)
//! add_once(h):      topic = fixed topic, always (even when empty)
//! ```
//!
//! An empty fixed topic is the literal key `""` for subscriptions. It is **not**
//! a wildcard: handlers added through an unscoped broker only see events emitted
//! to `""` explicitly.

use std::sync::Arc;

use crate::core::Emitter;
use crate::error::BrokerError;
use crate::events::Event;
use crate::handlers::HandlerRef;

/// Topic-scoped publisher/subscriber over one [`Emitter`].
///
/// Cheap to clone: clones share the emitter and the topic string.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use topicvisor::{Broker, Emitter, Envelope, HandlerFn};
///
/// let emitter = Arc::new(Emitter::new());
/// let orders = Broker::new(Arc::clone(&emitter), "orders");
///
/// orders.add_handler(HandlerFn::arc("ack", |ev: &Envelope<u32>| {
///     assert_eq!(&*ev.topic_arc(), "shipping");
///     Ok(())
/// }));
///
/// // The fixed topic wins over the event's own topic.
/// orders.emit(&Envelope::new("shipping", 1))?;
/// # Ok::<(), topicvisor::BrokerError>(())
/// ```
pub struct Broker<E> {
    emitter: Arc<Emitter<E>>,
    topic: Arc<str>,
}

impl<E: Event> Broker<E> {
    /// Creates a broker bound to `topic`.
    ///
    /// An empty `topic` behaves like [`Broker::unscoped`].
    #[must_use]
    pub fn new(emitter: Arc<Emitter<E>>, topic: impl Into<Arc<str>>) -> Self {
        Self {
            emitter,
            topic: topic.into(),
        }
    }

    /// Creates a broker without a fixed topic; emits follow each event's topic.
    #[must_use]
    pub fn unscoped(emitter: Arc<Emitter<E>>) -> Self {
        Self::new(emitter, "")
    }

    /// Publishes `event` to the fixed topic, or to `event.topic()` when unscoped.
    ///
    /// ### Errors
    /// Propagates [`BrokerError::Handler`] from the emitter.
    pub fn emit(&self, event: &E) -> Result<&Self, BrokerError> {
        let topic = self.resolve(event);
        self.emitter.emit(topic, event)?;
        Ok(self)
    }

    /// Registers `handler` on the fixed topic for every future emit.
    pub fn add_handler(&self, handler: HandlerRef<E>) -> &Self {
        self.emitter.on(&self.topic, handler);
        self
    }

    /// Registers `handler` on the fixed topic for the next emit only.
    pub fn add_once(&self, handler: HandlerRef<E>) -> &Self {
        self.emitter.once(&self.topic, handler);
        self
    }

    /// Fixed topic, or `None` when the broker is unscoped.
    #[inline]
    pub fn topic(&self) -> Option<&str> {
        if self.topic.is_empty() {
            None
        } else {
            Some(&self.topic)
        }
    }

    /// The shared emitter behind this broker.
    #[inline]
    pub fn emitter(&self) -> &Arc<Emitter<E>> {
        &self.emitter
    }

    /// Effective topic for publishing `event`.
    #[inline]
    pub fn resolve<'a>(&'a self, event: &'a E) -> &'a str {
        match self.topic() {
            Some(fixed) => fixed,
            None => event.topic(),
        }
    }
}

impl<E> Clone for Broker<E> {
    fn clone(&self) -> Self {
        Self {
            emitter: Arc::clone(&self.emitter),
            topic: Arc::clone(&self.topic),
        }
    }
}

impl<E> std::fmt::Debug for Broker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broker").field("topic", &self.topic).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::events::Envelope;
    use crate::handlers::HandlerFn;

    type Ev = Envelope<u32>;

    fn recorder(tag: &'static str, log: &Arc<Mutex<Vec<String>>>) -> HandlerRef<Ev> {
        let log = Arc::clone(log);
        HandlerFn::arc(tag, move |ev: &Ev| {
            log.lock().unwrap().push(format!("{tag}:{}:{}", ev.topic_arc(), ev.payload));
            Ok(())
        })
    }

    #[test]
    fn test_fixed_topic_wins_over_event_topic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let emitter = Arc::new(Emitter::new());
        emitter
            .on("orders", recorder("orders", &log))
            .on("shipping", recorder("shipping", &log));

        let broker = Broker::new(Arc::clone(&emitter), "orders");
        broker.emit(&Envelope::new("shipping", 1)).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["orders:shipping:1"]);
    }

    #[test]
    fn test_unscoped_broker_follows_event_topic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let emitter = Arc::new(Emitter::new());
        emitter
            .on("orders", recorder("orders", &log))
            .on("shipping", recorder("shipping", &log));

        let broker = Broker::unscoped(Arc::clone(&emitter));
        assert_eq!(broker.topic(), None);
        broker.emit(&Envelope::new("shipping", 2)).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["shipping:shipping:2"]);
    }

    #[test]
    fn test_chained_handlers_fire_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let broker = Broker::new(Arc::new(Emitter::new()), "orders");
        broker
            .add_handler(recorder("h1", &log))
            .add_handler(recorder("h2", &log));

        broker.emit(&Envelope::new("orders", 3)).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["h1:orders:3", "h2:orders:3"]);
    }

    #[test]
    fn test_add_once_fires_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let broker = Broker::new(Arc::new(Emitter::new()), "orders");
        broker.add_once(recorder("once", &log));

        broker
            .emit(&Envelope::new("orders", 1))
            .unwrap()
            .emit(&Envelope::new("orders", 2))
            .unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["once:orders:1"]);
    }

    #[test]
    fn test_unscoped_handlers_live_on_empty_topic() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let emitter = Arc::new(Emitter::new());
        let broker = Broker::unscoped(Arc::clone(&emitter));
        broker.add_handler(recorder("empty", &log));

        // not a wildcard
        broker.emit(&Envelope::new("shipping", 1)).unwrap();
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(emitter.listener_count(""), 1);

        // reachable by emitting to "" explicitly
        broker.emit(&Envelope::new("", 2)).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["empty::2"]);
    }

    #[test]
    fn test_clones_share_the_emitter() {
        let broker: Broker<Ev> = Broker::new(Arc::new(Emitter::new()), "orders");
        let other = broker.clone();
        other.add_handler(HandlerFn::arc("noop", |_ev: &Ev| Ok(())));

        assert!(Arc::ptr_eq(broker.emitter(), other.emitter()));
        assert_eq!(broker.emitter().listener_count("orders"), 1);
    }
}
