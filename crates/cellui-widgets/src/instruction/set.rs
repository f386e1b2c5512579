#![forbid(unsafe_code)]

//! Sequential group of instructions.
//!
//! An [`InstructionSet`] runs its children one at a time in insertion
//! order. When a child finishes, the next one is started within the same
//! update with a zero delta, so a chain of instant instructions completes
//! in a single frame. The set finishes after its last child. Child events
//! are forwarded into the set's own queue.

use std::fmt;
use std::time::Duration;

use super::{Instruction, InstructionState};

/// Runs child instructions in order.
pub struct InstructionSet<T: ?Sized> {
    state: InstructionState,
    children: Vec<Box<dyn Instruction<T>>>,
    current: usize,
}

impl<T: ?Sized> fmt::Debug for InstructionSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionSet")
            .field("state", &self.state)
            .field(
                "children",
                &self.children.iter().map(|c| c.id()).collect::<Vec<_>>(),
            )
            .field("current", &self.current)
            .finish()
    }
}

impl<T: ?Sized> InstructionSet<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            state: InstructionState::new(id),
            children: Vec::new(),
            current: 0,
        }
    }

    /// Append a child (builder pattern).
    #[must_use]
    pub fn then(mut self, instruction: impl Instruction<T> + 'static) -> Self {
        self.children.push(Box::new(instruction));
        self
    }

    pub fn push(&mut self, instruction: Box<dyn Instruction<T>>) {
        self.children.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the child currently running.
    pub fn current(&self) -> usize {
        self.current
    }

    fn restart_children(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
        self.current = 0;
    }
}

impl<T: ?Sized> Instruction<T> for InstructionSet<T> {
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
        let mut delta = delta;
        while let Some(child) = self.children.get_mut(self.current) {
            child.update(target, delta);
            let events = child.state_mut().drain_events();
            let done = child.is_finished();
            self.state.extend_events(events);
            if !done {
                return;
            }
            self.current += 1;
            delta = Duration::ZERO;
        }
        if !self.state.finish() {
            self.restart_children();
        }
    }

    fn reset(&mut self) {
        self.state.reset();
        self.restart_children();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{CodeInstruction, InstructionEvent, Repeat, Wait};

    fn log(id: &'static str) -> CodeInstruction<Vec<&'static str>> {
        CodeInstruction::new(id, move |log: &mut Vec<&'static str>, _| log.push(id))
    }

    #[test]
    fn runs_children_in_order() {
        let mut set = InstructionSet::new("seq")
            .then(log("a"))
            .then(Wait::new("pause", Duration::from_millis(50)))
            .then(log("b"));
        let mut out = Vec::new();

        set.update(&mut out, Duration::from_millis(16));
        assert_eq!(out, vec!["a"]);
        assert_eq!(set.current(), 1);

        set.update(&mut out, Duration::from_millis(16));
        assert_eq!(out, vec!["a"]);

        set.update(&mut out, Duration::from_millis(40));
        assert_eq!(out, vec!["a", "b"]);
        assert!(set.is_finished());
    }

    #[test]
    fn forwards_child_events() {
        let mut set = InstructionSet::new("seq").then(log("a"));
        let mut out = Vec::new();
        set.update(&mut out, Duration::ZERO);
        assert_eq!(
            set.state_mut().drain_events(),
            vec![
                InstructionEvent::Finished { id: "a".into() },
                InstructionEvent::Finished { id: "seq".into() },
            ]
        );
    }

    #[test]
    fn empty_set_finishes_immediately() {
        let mut set: InstructionSet<()> = InstructionSet::new("empty");
        set.update(&mut (), Duration::ZERO);
        assert!(set.is_finished());
    }

    #[test]
    fn repeat_replays_children() {
        let mut set = InstructionSet::new("seq")
            .then(log("a"))
            .then(log("b"))
            .with_repeat(Repeat::Times(2));
        let mut out = Vec::new();
        set.update(&mut out, Duration::ZERO);
        assert!(!set.is_finished());
        set.update(&mut out, Duration::ZERO);
        assert!(set.is_finished());
        assert_eq!(out, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn reset_starts_over() {
        let mut set = InstructionSet::new("seq").then(log("a"));
        let mut out = Vec::new();
        set.update(&mut out, Duration::ZERO);
        set.reset();
        assert_eq!(set.current(), 0);
        set.update(&mut out, Duration::ZERO);
        assert_eq!(out, vec!["a", "a"]);
    }
}
