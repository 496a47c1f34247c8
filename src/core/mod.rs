//! Messaging core: registry, topic scoping and configuration.
//!
//! - [`emitter`]: topic → ordered handler entries, synchronous emit;
//! - [`broker`]: topic-scoped façade over a shared emitter;
//! - [`config`]: emitter/dispatcher settings.
//!
//! ## Wiring
//! ```text
//! Producer ──► Dispatch::dispatch(&ev) ──► Broker::emit(&ev)
//!                                             │ topic = fixed ∨ ev.topic()
//!                                             ▼
//!                                       Emitter::emit(topic, &ev)
//!                                             │ snapshot, registration order
//!                                             ▼
//!                                       Handler::execute(&ev) × N
//! ```

mod broker;
mod config;
mod emitter;

pub use broker::Broker;
pub use config::Config;
pub use emitter::Emitter;
