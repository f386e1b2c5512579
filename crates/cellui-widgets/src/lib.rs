#![forbid(unsafe_code)]

//! Widgets for cellui: the host console, the screen, the window widget with
//! its controls, and the timed instruction runner.

pub mod console;
pub mod control;
pub mod error;
pub mod instruction;
pub mod screen;
pub mod theme;
pub mod window;

pub use console::{Console, ConsoleId, ConsoleMouse};
pub use control::{Button, Control, ControlAction, ControlHost, Label};
pub use error::WindowError;
pub use instruction::{
    CodeInstruction, Instruction, InstructionEvent, InstructionRunner, InstructionSet,
    InstructionState, Repeat, Wait,
};
pub use screen::{FocusStack, Screen};
pub use theme::{Alignment, BorderSet, TitleArea, WindowTheme};
pub use window::{Window, WindowEvent};
