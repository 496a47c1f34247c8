//! # Emitter and dispatcher configuration.
//!
//! Provides [`Config`] centralized settings for the emitter registry and the queued
//! dispatcher.
//!
//! Config is used in two ways:
//! 1. **Emitter creation**: `Emitter::with_config(config)`
//! 2. **Queued dispatch**: `QueuedDispatcher::new(broker, &config)`
//!
//! ## Sentinel values
//! - `max_listeners = 0` → unlimited (no leak warning)

/// Configuration for the emitter and dispatchers.
///
/// ## Field semantics
/// - `max_listeners`: per-topic entry count above which a leak warning is logged (`0` = unlimited)
/// - `queue_capacity`: queued dispatcher buffer size (min 1; clamped)
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of registrations per topic after which the emitter warns once.
    ///
    /// Registration above the limit still succeeds; the warning only points at a
    /// probable handler leak (a handler added on every request, for instance).
    pub max_listeners: usize,

    /// Capacity of the queued dispatcher's bounded channel.
    ///
    /// `dispatch` fails with `BrokerError::QueueFull` once this many events are
    /// waiting for the worker. Minimum value is 1.
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the per-topic listener limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → warn when a topic holds more than `n` entries
    #[inline]
    pub fn listener_limit(&self) -> Option<usize> {
        if self.max_listeners == 0 {
            None
        } else {
            Some(self.max_listeners)
        }
    }

    /// Returns a queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_listeners = 10`
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            max_listeners: 10,
            queue_capacity: 1024,
        }
    }
}
