//! Error types used by handlers, the emitter and the dispatchers.
//!
//! This module defines two main error enums:
//!
//! - [`HandlerError`]: errors raised by an individual handler execution.
//! - [`BrokerError`]: errors surfaced by `emit`/`dispatch` to the caller.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by handler execution.
///
/// Returned from [`Handler::execute`](crate::Handler::execute). The emitter never
/// recovers from these; it wraps them in [`BrokerError::Handler`] and returns.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler carries no concrete implementation (bare [`Subscriber`](crate::Subscriber)).
    #[error("handler '{handler}' has no implementation")]
    Unimplemented {
        /// Name of the handler that was invoked.
        handler: String,
    },

    /// Handler ran and reported a failure.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use topicvisor::HandlerError;
    ///
    /// let err = HandlerError::failed("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Unimplemented { .. } => "handler_unimplemented",
            HandlerError::Failed { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Unimplemented { handler } => format!("unimplemented: {handler}"),
            HandlerError::Failed { error } => format!("error: {error}"),
        }
    }
}

/// # Errors surfaced to publishers.
///
/// Produced by [`Emitter::emit`](crate::Emitter::emit), [`Broker::emit`](crate::Broker::emit)
/// and the [`Dispatch`](crate::Dispatch) implementations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BrokerError {
    /// A handler failed; remaining handlers for that emit were not invoked.
    #[error("handler '{handler}' failed on topic '{topic}': {source}")]
    Handler {
        /// Topic the emit was addressed to.
        topic: String,
        /// Name of the failing handler.
        handler: &'static str,
        /// The handler's own error.
        #[source]
        source: HandlerError,
    },

    /// The dispatcher queue is at capacity; the event was not enqueued.
    #[error("dispatcher '{dispatcher}' queue is full")]
    QueueFull {
        /// Name of the dispatcher.
        dispatcher: &'static str,
    },

    /// The dispatcher worker is gone; the event was not enqueued.
    #[error("dispatcher '{dispatcher}' queue is closed")]
    QueueClosed {
        /// Name of the dispatcher.
        dispatcher: &'static str,
    },

    /// The dispatcher needs a tokio runtime to spawn its worker.
    #[error("dispatcher '{dispatcher}' requires a tokio runtime")]
    NoRuntime {
        /// Name of the dispatcher.
        dispatcher: &'static str,
    },
}

impl BrokerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use topicvisor::BrokerError;
    ///
    /// let err = BrokerError::QueueFull { dispatcher: "queued" };
    /// assert_eq!(err.as_label(), "broker_queue_full");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BrokerError::Handler { .. } => "broker_handler_failed",
            BrokerError::QueueFull { .. } => "broker_queue_full",
            BrokerError::QueueClosed { .. } => "broker_queue_closed",
            BrokerError::NoRuntime { .. } => "broker_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BrokerError::Handler {
                topic,
                handler,
                source,
            } => format!("topic={topic} handler={handler} {}", source.as_message()),
            BrokerError::QueueFull { dispatcher } => format!("queue full: {dispatcher}"),
            BrokerError::QueueClosed { dispatcher } => format!("queue closed: {dispatcher}"),
            BrokerError::NoRuntime { dispatcher } => format!("no runtime: {dispatcher}"),
        }
    }

    /// Returns the handler error when this is [`BrokerError::Handler`].
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            BrokerError::Handler { source, .. } => Some(source),
            _ => None,
        }
    }
}
