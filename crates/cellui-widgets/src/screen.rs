#![forbid(unsafe_code)]

//! The screen: z-order of top-level consoles, the modal focus stack, and
//! the frame's draw list.
//!
//! The host owns exactly one [`Screen`] and passes it by `&mut` to the
//! widgets that need it (show/hide/center/draw). There is no global state.
//!
//! # Invariants
//!
//! 1. A console id appears at most once in the z-order.
//! 2. A console id appears at most once in the focus stack; pushing an id
//!    that is already present moves it to the top.
//! 3. The last entry of the z-order and of the focus stack is top-most.

use cellui_core::geometry::Size;
use cellui_render::draw::{DrawCall, DrawList};

use crate::console::ConsoleId;

/// Stack of consoles that currently own keyboard focus, modal windows on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusStack {
    stack: Vec<ConsoleId>,
}

impl FocusStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` on top. An id already in the stack is moved, not duplicated.
    pub fn push(&mut self, id: ConsoleId) {
        if self.top() == Some(id) {
            return;
        }
        self.stack.retain(|entry| *entry != id);
        self.stack.push(id);
    }

    /// Remove `id` wherever it sits. Returns `false` if it was not present.
    pub fn pop(&mut self, id: ConsoleId) -> bool {
        match self.stack.iter().rposition(|entry| *entry == id) {
            Some(index) => {
                self.stack.remove(index);
                true
            }
            None => false,
        }
    }

    /// The console that currently has focus.
    #[must_use]
    pub fn top(&self) -> Option<ConsoleId> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn contains(&self, id: ConsoleId) -> bool {
        self.stack.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Bottom-to-top iteration.
    pub fn iter(&self) -> impl Iterator<Item = &ConsoleId> {
        self.stack.iter()
    }
}

/// Root of the scene: render size, z-order, focus, and draw list.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    render_size: Size,
    children: Vec<ConsoleId>,
    focus: FocusStack,
    draw_list: DrawList,
}

impl Screen {
    /// Create a screen whose render target is `render_size` pixels.
    #[must_use]
    pub fn new(render_size: Size) -> Self {
        Self {
            render_size,
            ..Self::default()
        }
    }

    /// Render target size in pixels.
    #[inline]
    pub const fn render_size(&self) -> Size {
        self.render_size
    }

    pub fn set_render_size(&mut self, render_size: Size) {
        self.render_size = render_size;
    }

    /// How many cells of `font` pixels fit on the screen.
    #[must_use]
    pub fn cells_for(&self, font: Size) -> Size {
        Size::new(
            self.render_size.width / font.width.max(1),
            self.render_size.height / font.height.max(1),
        )
    }

    /// Add `id` on top of the z-order. Returns `false` if already present.
    pub fn add(&mut self, id: ConsoleId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.children.push(id);
        true
    }

    /// Remove `id` from the z-order. Returns `false` if it was not present.
    pub fn remove(&mut self, id: ConsoleId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| *child != id);
        self.children.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: ConsoleId) -> bool {
        self.children.contains(&id)
    }

    /// Raise `id` above every other child. Returns `false` if not present.
    pub fn move_to_top(&mut self, id: ConsoleId) -> bool {
        let Some(index) = self.children.iter().position(|child| *child == id) else {
            return false;
        };
        let child = self.children.remove(index);
        self.children.push(child);
        true
    }

    /// Children back-to-front.
    pub fn children(&self) -> &[ConsoleId] {
        &self.children
    }

    pub fn focus(&self) -> &FocusStack {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusStack {
        &mut self.focus
    }

    /// Start a new frame: forget last frame's draw calls.
    pub fn begin_frame(&mut self) {
        self.draw_list.clear();
    }

    pub fn push_draw_call(&mut self, call: DrawCall) {
        self.draw_list.push(call);
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}
