#![forbid(unsafe_code)]

//! Per-frame input snapshots.
//!
//! Widgets do not consume raw [`Event`]s. The host folds every event it
//! polled during a frame into an [`InputTracker`], then hands the resulting
//! [`MouseState`] and [`KeyboardState`] to whatever should process input.
//! After the frame the host calls [`InputTracker::end_frame`] so edge
//! information ("pressed this frame") does not leak into the next frame.
//!
//! # Key releases
//!
//! Most terminals never report key releases. Until the tracker has seen at
//! least one [`KeyEventKind::Release`], it assumes releases are not
//! reported and treats every pressed key as released at the end of the
//! frame it was pressed in.

use crate::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use crate::geometry::{Point, Size};

/// Snapshot of the mouse for one frame.
///
/// Positions are in world space: `world_cell` is the screen cell under the
/// pointer, `world_pixel` the pixel position derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseState {
    pub world_cell: Point,
    pub world_pixel: Point,
    pub left_down: bool,
    pub right_down: bool,
    pub middle_down: bool,
}

impl MouseState {
    /// Mouse resting over `cell`, no buttons held.
    ///
    /// The pixel position is the top-left pixel of the cell.
    #[must_use]
    pub fn at_cell(cell: Point, cell_size: Size) -> Self {
        Self {
            world_cell: cell,
            world_pixel: cell.scale(cell_size),
            ..Self::default()
        }
    }

    /// Mouse at an exact pixel, no buttons held.
    #[must_use]
    pub fn at_pixel(pixel: Point, cell_size: Size) -> Self {
        Self {
            world_cell: pixel.cell_of(cell_size),
            world_pixel: pixel,
            ..Self::default()
        }
    }

    /// Set the left button state (builder pattern).
    #[must_use]
    pub fn with_left(mut self, down: bool) -> Self {
        self.left_down = down;
        self
    }

    /// Set the right button state (builder pattern).
    #[must_use]
    pub fn with_right(mut self, down: bool) -> Self {
        self.right_down = down;
        self
    }

    /// Whether `button` is currently held.
    #[must_use]
    pub const fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_down,
            MouseButton::Right => self.right_down,
            MouseButton::Middle => self.middle_down,
        }
    }

    fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left_down = down,
            MouseButton::Right => self.right_down = down,
            MouseButton::Middle => self.middle_down = down,
        }
    }
}

/// Snapshot of the keyboard for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardState {
    pressed: Vec<KeyCode>,
    down: Vec<KeyCode>,
    released: Vec<KeyCode>,
}

impl KeyboardState {
    /// An empty snapshot: nothing pressed, held, or released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as pressed this frame (builder pattern).
    #[must_use]
    pub fn with_pressed(mut self, key: KeyCode) -> Self {
        self.press(key);
        self
    }

    /// Mark `key` as released this frame (builder pattern).
    #[must_use]
    pub fn with_released(mut self, key: KeyCode) -> Self {
        self.release(key);
        self
    }

    /// Key went down during this frame.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Key is currently held.
    #[must_use]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Key went up during this frame.
    #[must_use]
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }

    /// Keys pressed this frame, in arrival order.
    pub fn pressed(&self) -> &[KeyCode] {
        &self.pressed
    }

    /// Whether anything happened on the keyboard this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.released.is_empty()
    }

    fn press(&mut self, key: KeyCode) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
        if !self.down.contains(&key) {
            self.down.push(key);
        }
    }

    fn release(&mut self, key: KeyCode) {
        self.down.retain(|k| *k != key);
        if !self.released.contains(&key) {
            self.released.push(key);
        }
    }

    fn clear_edges(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    fn clear_all(&mut self) {
        self.pressed.clear();
        self.down.clear();
        self.released.clear();
    }
}

/// Folds canonical events into per-frame [`MouseState`]/[`KeyboardState`].
#[derive(Debug, Clone)]
pub struct InputTracker {
    cell_size: Size,
    mouse: MouseState,
    keyboard: KeyboardState,
    reports_releases: bool,
}

impl InputTracker {
    /// Create a tracker. `cell_size` is the pixel size of one cell, used to
    /// derive [`MouseState::world_pixel`].
    #[must_use]
    pub fn new(cell_size: Size) -> Self {
        Self {
            cell_size,
            mouse: MouseState::default(),
            keyboard: KeyboardState::default(),
            reports_releases: false,
        }
    }

    /// Current mouse snapshot.
    #[must_use]
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    /// Current keyboard snapshot.
    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Whether the backend has been observed reporting key releases.
    #[must_use]
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    /// Fold one event into the current frame.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.apply_key(*key),
            Event::Mouse(mouse) => {
                let cell = Point::new(i32::from(mouse.x), i32::from(mouse.y));
                self.mouse.world_cell = cell;
                self.mouse.world_pixel = cell.scale(self.cell_size);
                match mouse.kind {
                    MouseEventKind::Down(button) | MouseEventKind::Drag(button) => {
                        self.mouse.set_button(button, true);
                    }
                    MouseEventKind::Up(button) => self.mouse.set_button(button, false),
                    _ => {}
                }
            }
            Event::Focus(false) => {
                crate::debug!("focus lost, clearing held input");
                self.mouse.left_down = false;
                self.mouse.right_down = false;
                self.mouse.middle_down = false;
                self.keyboard.clear_all();
            }
            Event::Focus(true) | Event::Resize { .. } | Event::Tick => {}
        }
    }

    /// Finish the frame: clear per-frame edges.
    pub fn end_frame(&mut self) {
        if !self.reports_releases {
            let held = std::mem::take(&mut self.keyboard.down);
            self.keyboard.clear_edges();
            self.keyboard.released = held;
            return;
        }
        self.keyboard.clear_edges();
    }

    fn apply_key(&mut self, key: KeyEvent) {
        crate::trace!(code = ?key.code, kind = ?key.kind, "key event");
        match key.kind {
            KeyEventKind::Press => self.keyboard.press(key.code),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => {
                self.reports_releases = true;
                self.keyboard.release(key.code);
            }
        }
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(Size::new(8, 16))
    }
}
