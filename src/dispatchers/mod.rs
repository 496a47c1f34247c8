//! Dispatch strategies.
//!
//! ## Contents
//! - [`Dispatch`] capability trait producers depend on
//! - [`Dispatcher`] inline forwarding to `Broker::emit`
//! - [`QueuedDispatcher`] bounded queue drained by a tokio worker

mod direct;
mod dispatch;
mod queued;

pub use direct::Dispatcher;
pub use dispatch::Dispatch;
pub use queued::QueuedDispatcher;
