#![forbid(unsafe_code)]

//! cellui public facade crate.
//!
//! Re-exports the types a host needs to drive windows and instructions from
//! its own update/draw loop, plus a small prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cellui_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use cellui_core::geometry::{Point, Rect, Sides, Size};
pub use cellui_core::input::{InputTracker, KeyboardState, MouseState};
#[cfg(feature = "tracing-json")]
pub use cellui_core::logging::init_json_logging;

// --- Render re-exports -----------------------------------------------------

pub use cellui_render::{Cell, DrawCall, DrawList, PackedRgba, Surface, SurfaceId};

// --- Widget re-exports -----------------------------------------------------

pub use cellui_widgets::{
    Alignment, BorderSet, Button, CodeInstruction, Console, ConsoleId, Control, ControlAction,
    FocusStack, Instruction, InstructionEvent, InstructionRunner, InstructionSet, Label, Repeat,
    Screen, Wait, Window, WindowError, WindowEvent, WindowTheme,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for cellui hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A window rejected a property value.
    Window(WindowError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Window(err) => Some(err),
        }
    }
}

impl From<WindowError> for Error {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

/// Standard result type for cellui APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, Button, CodeInstruction, Error, Event, InputTracker, Instruction,
        InstructionRunner, KeyCode, KeyboardState, Label, MouseState, Point, Result, Screen, Size,
        Window, WindowEvent, WindowTheme,
    };

    pub use crate::{core, render, widgets};
}

pub use cellui_core as core;
pub use cellui_render as render;
pub use cellui_widgets as widgets;
