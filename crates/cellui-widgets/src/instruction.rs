#![forbid(unsafe_code)]

//! Timed instructions: small units of work ticked by the host loop.
//!
//! An [`Instruction`] is updated once per frame with the elapsed time and
//! a mutable reference to whatever it acts on. When its work is done it
//! calls [`InstructionState::finish`], which either starts another
//! play-through (per its [`Repeat`] policy) or marks it finished and
//! queues [`InstructionEvent::Finished`].
//!
//! [`InstructionRunner`] owns a list of instructions, ticks the unfinished
//! ones, drops finished ones that asked to be removed, and collects their
//! events for the host to [`drain`](InstructionRunner::drain_events).
//!
//! # Invariants
//!
//! 1. `Finished` is queued at most once per reset.
//! 2. A finished instruction ignores updates until [`Instruction::reset`].
//! 3. Events are not replayed: draining clears the queue.

pub mod code;
pub mod set;
pub mod wait;

use std::fmt;
use std::time::Duration;

pub use code::CodeInstruction;
pub use set::InstructionSet;
pub use wait::Wait;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How many play-throughs an instruction runs before it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// A single play-through.
    #[default]
    Once,
    /// `n` play-throughs in total. `Times(0)` behaves like [`Repeat::Once`].
    Times(u32),
    /// Never finishes on its own.
    Forever,
}

impl Repeat {
    fn extra_plays(self) -> u32 {
        match self {
            Self::Once | Self::Forever => 0,
            Self::Times(n) => n.saturating_sub(1),
        }
    }
}

/// Milestones reported by instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionEvent {
    /// A play-through ended and another one started.
    Repeated { id: String },
    /// The instruction is done.
    Finished { id: String },
}

/// Bookkeeping shared by every instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionState {
    id: String,
    finished: bool,
    repeat: Repeat,
    plays_left: u32,
    remove_on_finished: bool,
    events: Vec<InstructionEvent>,
}

impl InstructionState {
    /// Fresh, unfinished state. Finished instructions are removed from a
    /// runner by default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            finished: false,
            repeat: Repeat::Once,
            plays_left: 0,
            remove_on_finished: true,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Change the repeat policy. Restarts the play-through count.
    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.repeat = repeat;
        self.plays_left = repeat.extra_plays();
    }

    pub fn remove_on_finished(&self) -> bool {
        self.remove_on_finished
    }

    pub fn set_remove_on_finished(&mut self, remove: bool) {
        self.remove_on_finished = remove;
    }

    /// End the current play-through.
    ///
    /// Returns `true` when the instruction is now finished and `false` when
    /// another play-through begins, in which case the caller resets its own
    /// per-play state. Calling this on a finished instruction does nothing.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return true;
        }
        let again = match self.repeat {
            Repeat::Forever => true,
            Repeat::Once | Repeat::Times(_) if self.plays_left > 0 => {
                self.plays_left -= 1;
                true
            }
            Repeat::Once | Repeat::Times(_) => false,
        };
        if again {
            #[cfg(feature = "tracing")]
            tracing::trace!(instruction = %self.id, "instruction repeated");
            self.events.push(InstructionEvent::Repeated {
                id: self.id.clone(),
            });
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(instruction = %self.id, "instruction finished");
        self.finished = true;
        self.events.push(InstructionEvent::Finished {
            id: self.id.clone(),
        });
        true
    }

    /// Back to unfinished with the full repeat count. Pending events are
    /// kept.
    pub fn reset(&mut self) {
        self.finished = false;
        self.plays_left = self.repeat.extra_plays();
    }

    /// Take the queued events.
    pub fn drain_events(&mut self) -> Vec<InstructionEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn extend_events(&mut self, events: Vec<InstructionEvent>) {
        self.events.extend(events);
    }
}

/// A unit of timed work acting on a `T`.
pub trait Instruction<T: ?Sized> {
    fn state(&self) -> &InstructionState;

    fn state_mut(&mut self) -> &mut InstructionState;

    /// Advance by `delta`. Does nothing once finished.
    fn update(&mut self, target: &mut T, delta: Duration);

    fn id(&self) -> &str {
        self.state().id()
    }

    fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    /// Start over from the first play-through.
    fn reset(&mut self) {
        self.state_mut().reset();
    }

    /// Set the repeat policy (builder pattern).
    #[must_use]
    fn with_repeat(mut self, repeat: Repeat) -> Self
    where
        Self: Sized,
    {
        self.state_mut().set_repeat(repeat);
        self
    }

    /// Keep the instruction in its runner after it finishes (builder
    /// pattern).
    #[must_use]
    fn keep_when_finished(mut self) -> Self
    where
        Self: Sized,
    {
        self.state_mut().set_remove_on_finished(false);
        self
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Host-ticked list of instructions acting on the same target.
pub struct InstructionRunner<T: ?Sized> {
    instructions: Vec<Box<dyn Instruction<T>>>,
    events: Vec<InstructionEvent>,
}

impl<T: ?Sized> fmt::Debug for InstructionRunner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionRunner")
            .field(
                "instructions",
                &self.instructions.iter().map(|i| i.id()).collect::<Vec<_>>(),
            )
            .field("events", &self.events)
            .finish()
    }
}

impl<T: ?Sized> Default for InstructionRunner<T> {
    fn default() -> Self {
        Self {
            instructions: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl<T: ?Sized> InstructionRunner<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction. It is first ticked on the next update.
    pub fn add(&mut self, instruction: impl Instruction<T> + 'static) {
        self.instructions.push(Box::new(instruction));
    }

    pub fn add_boxed(&mut self, instruction: Box<dyn Instruction<T>>) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// First instruction with `id`.
    pub fn get(&self, id: &str) -> Option<&dyn Instruction<T>> {
        self.instructions
            .iter()
            .find(|instruction| instruction.id() == id)
            .map(|instruction| instruction.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn Instruction<T>>> {
        self.instructions
            .iter_mut()
            .find(|instruction| instruction.id() == id)
    }

    /// Remove every instruction with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.instructions.len();
        self.instructions.retain(|instruction| instruction.id() != id);
        before - self.instructions.len()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Tick every unfinished instruction in insertion order.
    pub fn update(&mut self, target: &mut T, delta: Duration) {
        for instruction in &mut self.instructions {
            if !instruction.is_finished() {
                instruction.update(target, delta);
            }
            self.events.extend(instruction.state_mut().drain_events());
        }
        self.instructions.retain(|instruction| {
            !(instruction.is_finished() && instruction.state().remove_on_finished())
        });
    }

    /// Take the events collected by past updates.
    pub fn drain_events(&mut self) -> Vec<InstructionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_once() {
        let mut state = InstructionState::new("a");
        assert!(state.finish());
        assert!(state.is_finished());
        assert!(state.finish());
        assert_eq!(
            state.drain_events(),
            vec![InstructionEvent::Finished { id: "a".into() }]
        );
    }

    #[test]
    fn finish_times_counts_play_throughs() {
        let mut state = InstructionState::new("t");
        state.set_repeat(Repeat::Times(3));
        assert!(!state.finish());
        assert!(!state.finish());
        assert!(state.finish());
        let events = state.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], InstructionEvent::Finished { id: "t".into() });
    }

    #[test]
    fn times_zero_is_once() {
        let mut state = InstructionState::new("z");
        state.set_repeat(Repeat::Times(0));
        assert!(state.finish());
    }

    #[test]
    fn forever_never_finishes() {
        let mut state = InstructionState::new("f");
        state.set_repeat(Repeat::Forever);
        for _ in 0..100 {
            assert!(!state.finish());
        }
        assert!(!state.is_finished());
    }

    #[test]
    fn reset_restores_repeats() {
        let mut state = InstructionState::new("r");
        state.set_repeat(Repeat::Times(2));
        state.finish();
        state.finish();
        assert!(state.is_finished());
        state.reset();
        assert!(!state.is_finished());
        assert!(!state.finish());
        assert!(state.finish());
    }
}
