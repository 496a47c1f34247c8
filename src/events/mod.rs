//! Published events: the routing capability and the default carrier.
//!
//! ## Contents
//! - [`Event`] trait every published value implements (topic accessor)
//! - [`Envelope`] topic + payload + sequence/timestamp metadata

mod event;

pub use event::{Envelope, Event};
