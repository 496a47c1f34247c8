//! # Built-in handlers
//!
//! Small, self-contained implementations useful for demos and debugging.
//!
//! - [`LogHandler`]: writes events through `tracing` (demo/debug).

mod log;

pub use log::LogHandler;
