//! # Deferred dispatch through a bounded queue.
//!
//! [`QueuedDispatcher`] decouples producers from handler execution: `dispatch`
//! clones the event into a bounded queue and returns immediately; a single worker
//! task drains the queue and calls [`Broker::emit`] for each event.
//!
//! ## Architecture
//! ```text
//! dispatch(&ev)
//!     │ try_send(ev.clone())
//!     ▼
//! [queue] (bounded, Config::queue_capacity)
//!     │
//!     ▼
//! worker ──► Broker::emit(&ev) ──► handlers (registration order)
//!              ├─ Err   → warn, continue with next event
//!              └─ panic → caught, error, continue with next event
//! ```
//!
//! ## Rules
//! - **FIFO**: events are emitted in the order `dispatch` accepted them.
//! - **Non-blocking**: `dispatch()` never waits (uses `try_send`).
//! - **Overflow**: a full queue rejects the event with `BrokerError::QueueFull`.
//! - **Isolation**: a failing or panicking handler doesn't stop the worker.
//!
//! Handlers still run synchronously on the worker; keep them short or they stall
//! the runtime thread the worker is scheduled on.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a handler panics while holding a lock.

use std::panic::{self, AssertUnwindSafe};

use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use tracing::{debug, error, warn};

use crate::core::{Broker, Config};
use crate::error::BrokerError;
use crate::events::Event;

use super::Dispatch;

const NAME: &str = "QueuedDispatcher";

/// Dispatcher that emits on a background worker task.
///
/// Must be created inside a tokio runtime; use [`try_new`](Self::try_new) when
/// that is not guaranteed.
pub struct QueuedDispatcher<E> {
    sender: mpsc::Sender<E>,
    worker: JoinHandle<()>,
    capacity: usize,
}

impl<E: Event + Clone> QueuedDispatcher<E> {
    /// Creates the queue and spawns its worker.
    ///
    /// ### Notes
    /// - Queue capacity comes from [`Config::queue_capacity_clamped`]
    /// - The worker runs until [`shutdown`](Self::shutdown) or drop of the dispatcher
    ///
    /// ### Panics
    /// Outside a tokio runtime.
    #[must_use]
    pub fn new(broker: Broker<E>, cfg: &Config) -> Self {
        Self::spawn_on(&Handle::current(), broker, cfg)
    }

    /// Like [`new`](Self::new), but fails instead of panicking outside a runtime.
    ///
    /// ### Errors
    /// [`BrokerError::NoRuntime`] when no tokio runtime is entered.
    pub fn try_new(broker: Broker<E>, cfg: &Config) -> Result<Self, BrokerError> {
        let handle = Handle::try_current().map_err(|err| {
            debug!(dispatcher = NAME, error = %err, "no runtime");
            BrokerError::NoRuntime { dispatcher: NAME }
        })?;
        Ok(Self::spawn_on(&handle, broker, cfg))
    }

    fn spawn_on(handle: &Handle, broker: Broker<E>, cfg: &Config) -> Self {
        let capacity = cfg.queue_capacity_clamped();
        let (sender, mut rx) = mpsc::channel::<E>(capacity);

        let worker = handle.spawn(async move {
            while let Some(ev) = rx.recv().await {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| broker.emit(&ev).map(|_| ())));

                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        warn!(
                            dispatcher = NAME,
                            label = err.as_label(),
                            error = %err,
                            "queued emit failed"
                        );
                    }
                    Err(panic_err) => {
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        error!(
                            dispatcher = NAME,
                            topic = broker.resolve(&ev),
                            info = %info,
                            "handler panicked"
                        );
                    }
                }
            }
            debug!(dispatcher = NAME, "worker drained");
        });

        Self {
            sender,
            worker,
            capacity,
        }
    }

    /// Number of events accepted but not yet picked up by the worker.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.capacity - self.sender.capacity()
    }

    /// Graceful shutdown: closes the queue and waits until every accepted event
    /// has been emitted.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(err) = self.worker.await {
            debug!(dispatcher = NAME, error = %err, "worker join failed");
        }
    }
}

impl<E: Event + Clone> Dispatch<E> for QueuedDispatcher<E> {
    fn dispatch(&self, event: &E) -> Result<&Self, BrokerError> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(self),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(dispatcher = NAME, topic = event.topic(), "queue full; event rejected");
                Err(BrokerError::QueueFull { dispatcher: NAME })
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(dispatcher = NAME, topic = event.topic(), "worker closed; event rejected");
                Err(BrokerError::QueueClosed { dispatcher: NAME })
            }
        }
    }
}

impl<E> std::fmt::Debug for QueuedDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedDispatcher")
            .field("capacity", &self.capacity)
            .finish()
    }
}
