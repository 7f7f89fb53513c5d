//! # Built-in subscribers
//!
//! These are small, self-contained implementations useful for demos.
//!
//! - [`LogWriter`]: prints notifications in a human-readable form (demo/debug).

mod log;

pub use log::LogWriter;
