//! # Core handler trait and function-backed handler.
//!
//! [`Handler`] is the extension point for reacting to published events. The emitter
//! calls [`Handler::execute`] synchronously, on the publisher's stack, once per
//! registration per matching emit.
//!
//! [`HandlerFn`] wraps a closure `F: Fn(&E) -> Result<(), HandlerError>` so that
//! small reactions don't need a dedicated type.
//!
//! ## Example
//! ```rust
//! use topicvisor::{Envelope, Handler, HandlerError, HandlerFn, HandlerRef};
//!
//! let h: HandlerRef<Envelope<u32>> = HandlerFn::arc("double", |ev: &Envelope<u32>| {
//!     if ev.payload == 0 {
//!         return Err(HandlerError::failed("zero"));
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(h.name(), "double");
//! assert!(h.execute(&Envelope::new("n", 2)).is_ok());
//! ```

use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::Event;

/// Contract for event handlers.
///
/// Called synchronously from [`Emitter::emit`](crate::Emitter::emit). Returning `Err`
/// aborts the remaining handlers of that emit pass and surfaces the error to the
/// publisher.
pub trait Handler<E>: Send + Sync + 'static {
    /// Reacts to a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn execute(&self, event: &E) -> Result<(), HandlerError>;

    /// Human-readable name (for logs/errors).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a handler.
pub type HandlerRef<E> = Arc<dyn Handler<E>>;

/// Function-backed handler implementation.
pub struct HandlerFn<F> {
    name: &'static str,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`].
    pub fn new<E>(name: &'static str, f: F) -> Self
    where
        E: Event,
        F: Fn(&E) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self { name, f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc<E>(name: &'static str, f: F) -> Arc<Self>
    where
        E: Event,
        F: Fn(&E) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<E, F> Handler<E> for HandlerFn<F>
where
    E: Event,
    F: Fn(&E) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn execute(&self, event: &E) -> Result<(), HandlerError> {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").field("name", &self.name).finish()
    }
}
