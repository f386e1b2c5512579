#![forbid(unsafe_code)]

//! Controls hosted inside a window.
//!
//! A [`Control`] occupies a console-relative [`Rect`], reacts to the input
//! snapshots its host routes to it, and paints itself onto the host's
//! surface. Controls never touch the window directly; they answer with a
//! [`ControlAction`] and the window acts on it.
//!
//! # Routing
//!
//! [`ControlHost`] captures the mouse on the control under the pointer when
//! the left button goes down and keeps routing to it until the button is
//! released, so a press that wanders off a button and comes back is still
//! the same press. Keyboard input goes to the focused control; Tab and
//! Shift+Tab cycle focus over focusable controls.

use cellui_core::event::KeyCode;
use cellui_core::geometry::Rect;
use cellui_core::input::KeyboardState;
use cellui_render::cell::Cell;
use cellui_render::surface::Surface;
use unicode_width::UnicodeWidthStr;

use crate::console::ConsoleMouse;
use crate::theme::WindowTheme;

/// Display width of `text` in cells, saturating at `u16::MAX`.
pub(crate) fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// What a control did with a piece of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Not interested.
    Ignored,
    /// Consumed, nothing further to do.
    Handled,
    /// The control fired (e.g. a button was clicked).
    Activated,
    /// The control asks its window to close with this dialog result.
    Dismiss(bool),
}

impl ControlAction {
    /// Whether the input was consumed.
    #[inline]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// An interactive element placed on a window.
pub trait Control {
    /// Console-relative area the control occupies.
    fn area(&self) -> Rect;

    /// Whether the control can take keyboard focus.
    fn is_focusable(&self) -> bool {
        true
    }

    /// React to the mouse. Only called while the pointer is over the control
    /// or the control holds the mouse capture.
    fn process_mouse(&mut self, mouse: &ConsoleMouse) -> ControlAction;

    /// React to the keyboard. Only called on the focused control.
    fn process_keyboard(&mut self, _keys: &KeyboardState) -> ControlAction {
        ControlAction::Ignored
    }

    /// Paint onto the host surface.
    fn draw(&self, surface: &mut Surface, theme: &WindowTheme, focused: bool);

    /// Drop any press in progress. Called when the host stops routing input,
    /// so a release it never saw cannot complete a click later.
    fn cancel_input(&mut self) {}
}

/// Ordered collection of controls with focus and mouse capture.
#[derive(Default)]
pub struct ControlHost {
    controls: Vec<Box<dyn Control>>,
    focused: Option<usize>,
    captured: Option<usize>,
    left_was_down: bool,
}

impl std::fmt::Debug for ControlHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlHost")
            .field("controls", &self.controls.len())
            .field("focused", &self.focused)
            .field("captured", &self.captured)
            .finish()
    }
}

impl ControlHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control on top of the others and return its index.
    ///
    /// The first focusable control added takes focus.
    pub fn add(&mut self, control: Box<dyn Control>) -> usize {
        let index = self.controls.len();
        let focusable = control.is_focusable();
        self.controls.push(control);
        if self.focused.is_none() && focusable {
            self.focused = Some(index);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Control> {
        self.controls.get(index).map(|control| control.as_ref())
    }

    /// Index of the focused control.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focus the control at `index`. Returns `false` if it is missing or
    /// not focusable.
    pub fn focus(&mut self, index: usize) -> bool {
        match self.controls.get(index) {
            Some(control) if control.is_focusable() => {
                self.focused = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Move focus to the next focusable control, wrapping around.
    pub fn focus_next(&mut self) -> bool {
        self.cycle_focus(true)
    }

    /// Move focus to the previous focusable control, wrapping around.
    pub fn focus_previous(&mut self) -> bool {
        self.cycle_focus(false)
    }

    fn cycle_focus(&mut self, forward: bool) -> bool {
        let len = self.controls.len();
        if len == 0 {
            return false;
        }
        let start = self.focused.unwrap_or(if forward { len - 1 } else { 0 });
        for step in 1..=len {
            let index = if forward {
                (start + step) % len
            } else {
                (start + len - step % len) % len
            };
            if self.controls[index].is_focusable() {
                self.focused = Some(index);
                return true;
            }
        }
        false
    }

    /// Forget the mouse capture and button history and cancel every
    /// control's press in progress. Focus is kept.
    pub fn reset_input(&mut self) {
        self.captured = None;
        self.left_was_down = false;
        for control in &mut self.controls {
            control.cancel_input();
        }
    }

    fn hit_test(&self, mouse: &ConsoleMouse) -> Option<usize> {
        if !mouse.is_on_console {
            return None;
        }
        self.controls
            .iter()
            .rposition(|control| control.area().contains_point(mouse.cell))
    }

    /// Route a mouse snapshot. Returns the index of the control that
    /// received it together with its answer.
    pub fn process_mouse(&mut self, mouse: &ConsoleMouse) -> (Option<usize>, ControlAction) {
        let left_down = mouse.left_down();
        let pressed = left_down && !self.left_was_down;
        let released = !left_down && self.left_was_down;
        self.left_was_down = left_down;

        let target = if pressed {
            let hit = self.hit_test(mouse);
            self.captured = hit;
            if let Some(index) = hit {
                self.focus(index);
            }
            hit
        } else if left_down || released {
            self.captured
        } else {
            self.hit_test(mouse)
        };
        if !left_down {
            self.captured = None;
        }

        match target.and_then(|index| self.controls.get_mut(index).map(|c| (index, c))) {
            Some((index, control)) => (Some(index), control.process_mouse(mouse)),
            None => (None, ControlAction::Ignored),
        }
    }

    /// Route a keyboard snapshot to the focused control.
    pub fn process_keyboard(&mut self, keys: &KeyboardState) -> (Option<usize>, ControlAction) {
        if keys.is_key_pressed(KeyCode::Tab) {
            let moved = self.focus_next();
            return (self.focused, if moved { ControlAction::Handled } else { ControlAction::Ignored });
        }
        if keys.is_key_pressed(KeyCode::BackTab) {
            let moved = self.focus_previous();
            return (self.focused, if moved { ControlAction::Handled } else { ControlAction::Ignored });
        }
        match self.focused.and_then(|index| self.controls.get_mut(index).map(|c| (index, c))) {
            Some((index, control)) => (Some(index), control.process_keyboard(keys)),
            None => (None, ControlAction::Ignored),
        }
    }

    /// Paint every control in order.
    pub fn draw(&self, surface: &mut Surface, theme: &WindowTheme) {
        for (index, control) in self.controls.iter().enumerate() {
            control.draw(surface, theme, self.focused == Some(index));
        }
    }
}

/// A clickable push button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    text: String,
    area: Rect,
    dialog_result: Option<bool>,
    pressed: bool,
}

impl Button {
    /// A button at (x, y), sized to fit `< text >`.
    pub fn new(text: impl Into<String>, x: u16, y: u16) -> Self {
        let text = text.into();
        let width = Self::width_for(&text);
        Self {
            text,
            area: Rect::new(x, y, width, 1),
            dialog_result: None,
            pressed: false,
        }
    }

    /// Width a button labelled `text` will have.
    pub fn width_for(text: &str) -> u16 {
        display_width(text).saturating_add(4)
    }

    /// Clicking closes the window with `result` (builder pattern).
    #[must_use]
    pub fn with_dialog_result(mut self, result: bool) -> Self {
        self.dialog_result = Some(result);
        self
    }

    /// Override the width (builder pattern).
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.area.width = width;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn activate(&self) -> ControlAction {
        match self.dialog_result {
            Some(result) => ControlAction::Dismiss(result),
            None => ControlAction::Activated,
        }
    }
}

impl Control for Button {
    fn area(&self) -> Rect {
        self.area
    }

    fn process_mouse(&mut self, mouse: &ConsoleMouse) -> ControlAction {
        let inside = mouse.is_on_console && self.area.contains_point(mouse.cell);
        if mouse.left_down() {
            if inside {
                self.pressed = true;
            }
            return if self.pressed {
                ControlAction::Handled
            } else {
                ControlAction::Ignored
            };
        }
        if self.pressed {
            self.pressed = false;
            return if inside {
                self.activate()
            } else {
                ControlAction::Handled
            };
        }
        if inside {
            ControlAction::Handled
        } else {
            ControlAction::Ignored
        }
    }

    fn cancel_input(&mut self) {
        self.pressed = false;
    }

    fn process_keyboard(&mut self, keys: &KeyboardState) -> ControlAction {
        if keys.is_key_pressed(KeyCode::Enter) || keys.is_key_pressed(KeyCode::Char(' ')) {
            self.activate()
        } else {
            ControlAction::Ignored
        }
    }

    fn draw(&self, surface: &mut Surface, theme: &WindowTheme, focused: bool) {
        let (fg, bg) = if focused {
            (theme.button_focused_fg, theme.button_focused_bg)
        } else {
            (theme.button_fg, theme.button_bg)
        };
        surface.fill(self.area, Cell::from_char(' ').with_fg(fg).with_bg(bg));

        let label = format!("< {} >", self.text);
        let label_width = display_width(&label);
        let x = self.area.x + self.area.width.saturating_sub(label_width) / 2;
        surface.print(x, self.area.y, &label, fg, bg, self.area.right());
    }
}

/// Static text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    area: Rect,
}

impl Label {
    /// A single-line label at (x, y).
    pub fn new(text: impl Into<String>, x: u16, y: u16) -> Self {
        let text = text.into();
        let width = display_width(&text);
        Self {
            text,
            area: Rect::new(x, y, width, 1),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Control for Label {
    fn area(&self) -> Rect {
        self.area
    }

    fn is_focusable(&self) -> bool {
        false
    }

    fn process_mouse(&mut self, _mouse: &ConsoleMouse) -> ControlAction {
        ControlAction::Ignored
    }

    fn draw(&self, surface: &mut Surface, theme: &WindowTheme, _focused: bool) {
        surface.print(
            self.area.x,
            self.area.y,
            &self.text,
            theme.foreground,
            theme.background,
            self.area.right(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellui_core::geometry::{Point, Size};
    use cellui_core::input::MouseState;

    fn mouse_at(x: i32, y: i32, left: bool) -> ConsoleMouse {
        ConsoleMouse {
            cell: Point::new(x, y),
            pixel: Point::new(x * 8, y * 16),
            world: MouseState::at_cell(Point::new(x, y), Size::new(8, 16)).with_left(left),
            is_on_console: x >= 0 && y >= 0,
        }
    }

    #[test]
    fn button_width_fits_decoration() {
        let button = Button::new("OK", 2, 3);
        assert_eq!(button.area(), Rect::new(2, 3, 6, 1));
        assert_eq!(Button::width_for("OK"), 6);
    }

    #[test]
    fn button_click_activates() {
        let mut button = Button::new("OK", 0, 0);
        assert_eq!(button.process_mouse(&mouse_at(1, 0, true)), ControlAction::Handled);
        assert!(button.is_pressed());
        assert_eq!(button.process_mouse(&mouse_at(1, 0, false)), ControlAction::Activated);
        assert!(!button.is_pressed());
    }

    #[test]
    fn button_release_outside_does_not_activate() {
        let mut button = Button::new("OK", 0, 0);
        button.process_mouse(&mouse_at(1, 0, true));
        assert_eq!(button.process_mouse(&mouse_at(1, 5, false)), ControlAction::Handled);
        assert!(!button.is_pressed());
    }

    #[test]
    fn dialog_button_dismisses() {
        let mut button = Button::new("No", 0, 0).with_dialog_result(false);
        button.process_mouse(&mouse_at(0, 0, true));
        assert_eq!(
            button.process_mouse(&mouse_at(0, 0, false)),
            ControlAction::Dismiss(false)
        );
        let keys = KeyboardState::new().with_pressed(KeyCode::Enter);
        assert_eq!(button.process_keyboard(&keys), ControlAction::Dismiss(false));
    }

    #[test]
    fn button_draws_label_centered() {
        let theme = WindowTheme::default();
        let mut surface = Surface::new(10, 1);
        Button::new("OK", 0, 0)
            .with_width(10)
            .draw(&mut surface, &theme, false);
        assert_eq!(surface.row_text(0), "  < OK >  ");
        assert_eq!(surface.get(0, 0).map(|c| c.bg), Some(theme.button_bg));
    }

    #[test]
    fn label_is_not_focusable() {
        let mut host = ControlHost::new();
        host.add(Box::new(Label::new("hello", 0, 0)));
        assert_eq!(host.focused(), None);
        host.add(Box::new(Button::new("OK", 0, 1)));
        assert_eq!(host.focused(), Some(1));
        assert!(!host.focus(0));
    }

    #[test]
    fn host_tab_cycles_focusable_controls() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        host.add(Box::new(Label::new("skip", 0, 1)));
        host.add(Box::new(Button::new("B", 0, 2)));
        assert_eq!(host.focused(), Some(0));

        let tab = KeyboardState::new().with_pressed(KeyCode::Tab);
        assert_eq!(host.process_keyboard(&tab), (Some(2), ControlAction::Handled));
        assert_eq!(host.process_keyboard(&tab), (Some(0), ControlAction::Handled));

        let back = KeyboardState::new().with_pressed(KeyCode::BackTab);
        assert_eq!(host.process_keyboard(&back), (Some(2), ControlAction::Handled));
    }

    #[test]
    fn host_routes_enter_to_focused_button() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        let enter = KeyboardState::new().with_pressed(KeyCode::Enter);
        assert_eq!(host.process_keyboard(&enter), (Some(0), ControlAction::Activated));
    }

    #[test]
    fn host_click_focuses_and_activates() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        host.add(Box::new(Button::new("B", 0, 2)));

        assert_eq!(host.process_mouse(&mouse_at(1, 2, true)), (Some(1), ControlAction::Handled));
        assert_eq!(host.focused(), Some(1));
        assert_eq!(host.process_mouse(&mouse_at(1, 2, false)), (Some(1), ControlAction::Activated));
    }

    #[test]
    fn host_keeps_capture_while_held() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        host.add(Box::new(Button::new("B", 0, 2)));

        host.process_mouse(&mouse_at(1, 0, true));
        // Dragged over B while still holding: A keeps the capture.
        assert_eq!(host.process_mouse(&mouse_at(1, 2, true)).0, Some(0));
        // Released over B: A gets the release, which lands outside it.
        assert_eq!(host.process_mouse(&mouse_at(1, 2, false)), (Some(0), ControlAction::Handled));
    }

    #[test]
    fn reset_input_cancels_press_in_progress() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        host.process_mouse(&mouse_at(1, 0, true));

        host.reset_input();
        // Hovering with the button up is not a release any more.
        assert_eq!(host.process_mouse(&mouse_at(1, 0, false)), (Some(0), ControlAction::Handled));
        assert_eq!(host.focused(), Some(0));
    }

    #[test]
    fn button_cancel_input_clears_press() {
        let mut button = Button::new("OK", 0, 0);
        button.process_mouse(&mouse_at(1, 0, true));
        button.cancel_input();
        assert!(!button.is_pressed());
        assert_eq!(button.process_mouse(&mouse_at(1, 0, false)), ControlAction::Handled);
    }

    #[test]
    fn display_width_saturates() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width(&"x".repeat(70_000)), u16::MAX);
        assert_eq!(Button::width_for(&"x".repeat(70_000)), u16::MAX);
    }

    #[test]
    fn press_on_empty_space_captures_nothing() {
        let mut host = ControlHost::new();
        host.add(Box::new(Button::new("A", 0, 0)));
        assert_eq!(host.process_mouse(&mouse_at(5, 5, true)), (None, ControlAction::Ignored));
        // Sliding onto the button while held does not start a press.
        assert_eq!(host.process_mouse(&mouse_at(1, 0, true)), (None, ControlAction::Ignored));
        assert_eq!(host.process_mouse(&mouse_at(1, 0, false)), (None, ControlAction::Ignored));
    }
}
