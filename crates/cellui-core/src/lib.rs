#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and per-frame input snapshots.

pub mod event;
pub mod geometry;
pub mod input;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
