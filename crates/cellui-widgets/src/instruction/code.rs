#![forbid(unsafe_code)]

//! Run a callback once.

use std::fmt;
use std::time::Duration;

use super::{Instruction, InstructionState};

/// Invokes its callback on the first update of each play-through, then
/// finishes.
pub struct CodeInstruction<T: ?Sized> {
    state: InstructionState,
    callback: Box<dyn FnMut(&mut T, Duration)>,
}

impl<T: ?Sized> CodeInstruction<T> {
    pub fn new(id: impl Into<String>, callback: impl FnMut(&mut T, Duration) + 'static) -> Self {
        Self {
            state: InstructionState::new(id),
            callback: Box::new(callback),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CodeInstruction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeInstruction")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> Instruction<T> for CodeInstruction<T> {
    fn state(&self) -> &InstructionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InstructionState {
        &mut self.state
    }

    fn update(&mut self, target: &mut T, delta: Duration) {
        if self.state.is_finished() {
            return;
        }
        (self.callback)(target, delta);
        self.state.finish();
    }
}
