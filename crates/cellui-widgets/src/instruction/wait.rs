#![forbid(unsafe_code)]

//! Timed delay.

use std::time::Duration;

use super::{Instruction, InstructionState, Repeat};

/// Finishes once the accumulated update deltas reach its duration.
#[derive(Debug, Clone)]
pub struct Wait {
    state: InstructionState,
    duration: Duration,
    remaining: Duration,
}

impl Wait {
    pub fn new(id: impl Into<String>, duration: Duration) -> Self {
        Self {
            state: InstructionState::new(id),
            duration,
            remaining: duration,
        }
    }

    /// Set the repeat policy (builder pattern).
    ///
    /// `Wait` acts on any target, so this saves naming one.
    #[must_use]
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.state.set_repeat(repeat);
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left in the current play-through.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }
}

impl<T: ?Sized> Instruction<T> for Wait {
    fn state(&self) -> &InstructionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InstructionState {
        &mut self.state
    }

    fn update(&mut self, _target: &mut T, delta: Duration) {
        if self.state.is_finished() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() && !self.state.finish() {
            self.remaining = self.duration;
        }
    }

    fn reset(&mut self) {
        self.state.reset();
        self.remaining = self.duration;
    }
}
