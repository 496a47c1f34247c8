//! Inline dispatcher: forwards straight to [`Broker::emit`].

use crate::core::Broker;
use crate::error::BrokerError;
use crate::events::Event;

use super::Dispatch;

/// Forwards each event to one borrowed [`Broker`] on the caller's stack.
///
/// Observable behavior is identical to calling `broker.emit(event)` directly.
#[derive(Debug)]
pub struct Dispatcher<'a, E> {
    broker: &'a Broker<E>,
}

impl<'a, E: Event> Dispatcher<'a, E> {
    /// Creates a dispatcher over `broker`.
    #[must_use]
    pub fn new(broker: &'a Broker<E>) -> Self {
        Self { broker }
    }

    /// The broker events are forwarded to.
    #[inline]
    pub fn broker(&self) -> &'a Broker<E> {
        self.broker
    }
}

impl<E: Event> Dispatch<E> for Dispatcher<'_, E> {
    fn dispatch(&self, event: &E) -> Result<&Self, BrokerError> {
        self.broker.emit(event)?;
        Ok(self)
    }
}

impl<E> Clone for Dispatcher<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Dispatcher<'_, E> {}
