//! # Topic-keyed, synchronous event emitter.
//!
//! [`Emitter`] owns the registry `topic → ordered entries`, where each entry is a
//! handler plus a registration mode (persistent or one-shot).
//!
//! ## Rules
//! - **Registration order**: handlers for a topic run in the order they were added.
//! - **Duplicates allowed**: registering the same handler twice makes it run twice.
//! - **Snapshot per emit**: the entry list is copied before iterating; handlers
//!   registered while an emit is running are first seen by the *next* emit.
//! - **One-shot removal**: a `once` entry is removed right before it runs. If it is
//!   already gone (consumed by a nested emit), it is skipped.
//! - **Fail fast**: the first handler error aborts the pass and is returned to the
//!   caller; entries not reached stay registered.
//! - **No listeners**: emitting to an unknown topic is a silent no-op.
//!
//! ## Internal scheme
//! ```text
//! emit(topic, &ev):
//!   ├─ lock → clone entries[topic] → unlock        (snapshot)
//!   └─ for entry in snapshot:
//!        ├─ Once? lock → remove by id → unlock   (skip if already removed)
//!        └─ entry.handler.execute(&ev)?          (lock is NOT held)
//! ```
//!
//! The registry lock is never held while a handler runs, so handlers may call
//! `on`/`once`/`emit` on the same emitter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::core::Config;
use crate::error::BrokerError;
use crate::events::Event;
use crate::handlers::{HandlerRef, Subscriber};

/// Registration mode of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Persistent,
    Once,
}

struct Entry<E> {
    id: u64,
    mode: Mode,
    handler: HandlerRef<E>,
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            mode: self.mode,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Entries of one topic.
struct Slot<E> {
    /// Position of the topic in first-registration order.
    order: u64,
    entries: Vec<Entry<E>>,
    /// Leak warning already logged for this topic.
    warned: bool,
}

struct Registry<E> {
    next_id: u64,
    next_order: u64,
    topics: HashMap<Arc<str>, Slot<E>>,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            next_id: 0,
            next_order: 0,
            topics: HashMap::new(),
        }
    }

    /// Removes a one-shot entry; returns `false` if it was already gone.
    fn take(&mut self, topic: &str, id: u64) -> bool {
        let Some(slot) = self.topics.get_mut(topic) else {
            return false;
        };
        let Some(pos) = slot.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        slot.entries.remove(pos);
        if slot.entries.is_empty() {
            self.topics.remove(topic);
        }
        true
    }
}

/// Process-local publish/subscribe bus keyed by topic.
///
/// Share it by reference or through an `Arc`; all methods take `&self`.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use topicvisor::{Emitter, Envelope, HandlerFn};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
///
/// let emitter = Emitter::new();
/// emitter
///     .on("ping", HandlerFn::arc("count", move |_ev: &Envelope<()>| {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }))
///     .on("ping", HandlerFn::arc("noop", |_ev: &Envelope<()>| Ok(())));
///
/// let ev = Envelope::new("ping", ());
/// emitter.emit("ping", &ev)?.emit("ping", &ev)?;
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// # Ok::<(), topicvisor::BrokerError>(())
/// ```
pub struct Emitter<E> {
    cfg: Config,
    registry: Mutex<Registry<E>>,
}

impl<E: Event> Emitter<E> {
    /// Creates an empty emitter with [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty emitter with the given configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            registry: Mutex::new(Registry::new()),
        }
    }

    /// Registers `handler` for every future emit on `topic`.
    pub fn on(&self, topic: &str, handler: HandlerRef<E>) -> &Self {
        self.register(topic, Mode::Persistent, handler)
    }

    /// Registers `handler` for the next emit on `topic` only.
    pub fn once(&self, topic: &str, handler: HandlerRef<E>) -> &Self {
        self.register(topic, Mode::Once, handler)
    }

    /// Registers a specialized [`Subscriber`] on its own topic (persistent).
    pub fn subscribe(&self, subscriber: Subscriber<E>) -> &Self {
        let topic = subscriber.topic().to_owned();
        self.on(&topic, Arc::new(subscriber))
    }

    /// Invokes every handler registered for `topic`, in registration order.
    ///
    /// ### Errors
    /// Returns [`BrokerError::Handler`] for the first handler that fails; the
    /// handlers after it are not invoked.
    pub fn emit(&self, topic: &str, event: &E) -> Result<&Self, BrokerError> {
        let snapshot: Vec<Entry<E>> = match self.lock().topics.get(topic) {
            Some(slot) => slot.entries.clone(),
            None => {
                trace!(topic, "emit without listeners");
                return Ok(self);
            }
        };
        debug!(topic, listeners = snapshot.len(), "emit");

        for entry in snapshot {
            if entry.mode == Mode::Once && !self.lock().take(topic, entry.id) {
                continue;
            }

            let handler = entry.handler.name();
            trace!(topic, handler, "execute");
            if let Err(source) = entry.handler.execute(event) {
                warn!(topic, handler, error = %source, "handler failed; emit aborted");
                return Err(BrokerError::Handler {
                    topic: topic.to_owned(),
                    handler,
                    source,
                });
            }
        }
        Ok(self)
    }

    /// Number of entries (persistent and pending one-shot) registered for `topic`.
    #[must_use]
    pub fn listener_count(&self, topic: &str) -> usize {
        self.lock()
            .topics
            .get(topic)
            .map_or(0, |slot| slot.entries.len())
    }

    /// Topics that currently have at least one entry, in first-registration order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let reg = self.lock();
        let mut topics: Vec<(u64, &Arc<str>)> = reg
            .topics
            .iter()
            .map(|(name, slot)| (slot.order, name))
            .collect();
        topics.sort_unstable_by_key(|(order, _)| *order);
        topics.into_iter().map(|(_, name)| name.to_string()).collect()
    }

    /// Configuration this emitter was built with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn register(&self, topic: &str, mode: Mode, handler: HandlerRef<E>) -> &Self {
        let name = handler.name();
        let overflow = {
            let mut guard = self.lock();
            let reg = &mut *guard;
            let id = reg.next_id;
            reg.next_id += 1;

            let next_order = &mut reg.next_order;
            let slot = reg.topics.entry(Arc::from(topic)).or_insert_with(|| {
                let order = *next_order;
                *next_order += 1;
                Slot {
                    order,
                    entries: Vec::new(),
                    warned: false,
                }
            });
            slot.entries.push(Entry { id, mode, handler });

            let count = slot.entries.len();
            match self.cfg.listener_limit() {
                Some(limit) if count > limit && !slot.warned => {
                    slot.warned = true;
                    Some((count, limit))
                }
                _ => None,
            }
        };

        trace!(topic, handler = name, ?mode, "registered");
        if let Some((count, limit)) = overflow {
            warn!(
                topic,
                count, limit, "possible handler leak: listener count exceeds max_listeners"
            );
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, Registry<E>> {
        // Handlers never run under the lock, so a poisoned guard still holds a consistent registry.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Event> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("cfg", &self.cfg)
            .field("topics", &self.topics())
            .finish()
    }
}
