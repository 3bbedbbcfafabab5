//! CLI handlers.
//!
//! - [`invoke`]: Run one configured tool against GitHub
//! - [`output`]: Write tool outcomes to stdout or stderr

pub mod invoke;
pub mod output;
