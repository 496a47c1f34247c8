//! # Topic-aware handler
//!
//! A [`Subscriber`] knows which topic it listens to but carries no reaction of its
//! own until it is specialized with [`Subscriber::handle`]. Executing a bare
//! subscriber is an error ([`HandlerError::Unimplemented`]), never a silent no-op.
//!
//! ```rust
//! use topicvisor::{Emitter, Envelope, Handler, HandlerError, HandlerFn, Subscriber};
//!
//! let bare: Subscriber<Envelope<()>> = Subscriber::new("audit");
//! assert!(matches!(
//!     bare.execute(&Envelope::new("audit", ())),
//!     Err(HandlerError::Unimplemented { .. })
//! ));
//!
//! let audit: Subscriber<Envelope<()>> =
//!     Subscriber::new("audit").handle(HandlerFn::arc("audit", |_ev: &Envelope<()>| Ok(())));
//! let emitter = Emitter::new();
//! emitter.subscribe(audit);
//! assert_eq!(emitter.listener_count("audit"), 1);
//! ```

use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::Event;
use crate::handlers::{Handler, HandlerRef};

/// Handler bound to a topic, specialized with a concrete reaction.
pub struct Subscriber<E> {
    topic: Arc<str>,
    inner: Option<HandlerRef<E>>,
}

impl<E: Event> Subscriber<E> {
    /// Creates an unspecialized subscriber for `topic`.
    #[must_use]
    pub fn new(topic: impl Into<Arc<str>>) -> Self {
        Self {
            topic: topic.into(),
            inner: None,
        }
    }

    /// Supplies the concrete reaction, replacing any previous one.
    #[must_use]
    pub fn handle(mut self, handler: HandlerRef<E>) -> Self {
        self.inner = Some(handler);
        self
    }

    /// Topic this subscriber listens to.
    #[inline]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// True once [`handle`](Self::handle) has been called.
    #[inline]
    pub fn is_implemented(&self) -> bool {
        self.inner.is_some()
    }
}

impl<E: Event> Handler<E> for Subscriber<E> {
    fn execute(&self, event: &E) -> Result<(), HandlerError> {
        match &self.inner {
            Some(h) => h.execute(event),
            None => Err(HandlerError::Unimplemented {
                handler: format!("Subscriber({})", self.topic),
            }),
        }
    }

    fn name(&self) -> &'static str {
        match &self.inner {
            Some(h) => h.name(),
            None => "Subscriber",
        }
    }
}

impl<E> Clone for Subscriber<E> {
    fn clone(&self) -> Self {
        Self {
            topic: Arc::clone(&self.topic),
            inner: self.inner.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Subscriber<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("topic", &self.topic)
            .field("implemented", &self.inner.is_some())
            .finish()
    }
}
