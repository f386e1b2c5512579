#![forbid(unsafe_code)]

//! Draw-call records.
//!
//! Widgets do not present anything themselves. During a frame they append
//! [`DrawCall`]s to a [`DrawList`] in back-to-front order; the host walks
//! the list and composites. All positions are in pixels.

use crate::cell::PackedRgba;
use crate::surface::SurfaceId;
use cellui_core::geometry::{Point, Size};

/// One compositing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Blend a flat colour over a pixel region.
    Tint {
        color: PackedRgba,
        origin: Point,
        size: Size,
    },
    /// Blit a surface with its top-left cell at `origin`.
    Surface {
        id: SurfaceId,
        origin: Point,
        cell_size: Size,
    },
}

/// Back-to-front list of draw calls for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call on top of everything pushed so far.
    pub fn push(&mut self, call: DrawCall) {
        #[cfg(feature = "tracing")]
        tracing::trace!(?call, depth = self.calls.len(), "draw call recorded");
        self.calls.push(call);
    }

    /// Drop every recorded call.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn as_slice(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter()
    }
}
