#![forbid(unsafe_code)]

//! Render kernel: cells, cell-grid surfaces, and the draw-call records a
//! host consumes each frame.
//!
//! Presenting cells to a terminal or GPU is the host's job; this crate only
//! produces the data.

pub mod cell;
pub mod draw;
pub mod surface;

pub use cell::{Cell, PackedRgba};
pub use draw::{DrawCall, DrawList};
pub use surface::{Surface, SurfaceId};
