#![forbid(unsafe_code)]

//! Window widget: a titled, draggable, optionally modal console that hosts
//! controls.
//!
//! A [`Window`] is built hidden. [`Window::show`] puts it on the [`Screen`]
//! and, when modal, on top of the focus stack with exclusive mouse capture.
//! [`Window::hide`] undoes exactly what `show` did and queues
//! [`WindowEvent::Closed`].
//!
//! # Dragging
//!
//! A left press on the theme's title area starts a drag. While the button
//! is held the window follows the pointer, keeping the grab offset and
//! staying inside the screen. Releasing ends the drag and restores the
//! exclusive-mouse flag the window had before it.
//!
//! # Events
//!
//! Nothing is called back. Events are queued and the host collects them
//! with [`Window::drain_events`] after feeding input.
//!
//! # Example
//!
//! ```
//! use cellui_core::geometry::Size;
//! use cellui_widgets::screen::Screen;
//! use cellui_widgets::window::{Window, WindowEvent};
//!
//! let mut screen = Screen::new(Size::new(640, 480));
//! let mut window = Window::new(20, 6).with_title("Hello").with_close_on_esc_key(true);
//! window.center(&screen);
//! window.show(&mut screen, true);
//! assert_eq!(screen.focus().top(), Some(window.id()));
//!
//! window.hide(&mut screen);
//! assert_eq!(
//!     window.drain_events(),
//!     vec![
//!         WindowEvent::Shown { modal: true },
//!         WindowEvent::Closed { dialog_result: false },
//!     ]
//! );
//! ```

use std::sync::Arc;

use cellui_core::event::KeyCode;
use cellui_core::geometry::{Point, Size};
use cellui_core::input::{KeyboardState, MouseState};
use cellui_render::draw::DrawCall;

use crate::console::{Console, ConsoleId};
use crate::control::{Button, Control, ControlAction, ControlHost, Label, display_width};
use crate::error::WindowError;
use crate::screen::Screen;
use crate::theme::{Alignment, WindowTheme};

/// Something that happened to a window since the last drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window became visible.
    Shown { modal: bool },
    /// The window was hidden.
    Closed { dialog_result: bool },
    /// A drag moved the window.
    Moved { position: Point },
    /// A hosted control fired.
    ControlActivated { index: usize },
}

/// Titled, draggable sub-console.
#[derive(Debug)]
pub struct Window {
    console: Console,
    controls: ControlHost,
    title: String,
    theme: Arc<WindowTheme>,
    title_alignment: Alignment,
    modal: bool,
    dragging: bool,
    can_drag: bool,
    close_on_esc_key: bool,
    previous_mouse: MouseState,
    drag_anchor: Point,
    exclusive_before_drag: bool,
    added_to_screen: bool,
    dialog_result: bool,
    events: Vec<WindowEvent>,
}

impl Window {
    /// Create a hidden window of `width` x `height` cells.
    pub fn new(width: u16, height: u16) -> Self {
        let mut console = Console::new(width, height);
        console.set_visible(false);
        Self {
            console,
            controls: ControlHost::new(),
            title: String::new(),
            theme: Arc::new(WindowTheme::default()),
            title_alignment: Alignment::Center,
            modal: false,
            dragging: false,
            can_drag: true,
            close_on_esc_key: false,
            previous_mouse: MouseState::default(),
            drag_anchor: Point::ZERO,
            exclusive_before_drag: false,
            added_to_screen: false,
            dialog_result: false,
            events: Vec::new(),
        }
    }

    /// Message box: `text` and a single button that closes it.
    pub fn message(text: &str, close_text: &str) -> Self {
        let text_width = display_width(text);
        let button_width = Button::width_for(close_text);
        let width = text_width.max(button_width).saturating_add(4);

        let mut window = Self::new(width, 6).with_close_on_esc_key(true);
        window.add_control(Label::new(text, 2, 2));
        window.add_control(
            Button::new(close_text, width.saturating_sub(button_width) / 2, 4)
                .with_dialog_result(true),
        );
        window
    }

    /// Yes/no prompt. The dialog result tells which button closed it.
    pub fn prompt(text: &str, yes_text: &str, no_text: &str) -> Self {
        let text_width = display_width(text);
        let yes_width = Button::width_for(yes_text);
        let no_width = Button::width_for(no_text);
        let width = text_width
            .max(yes_width.saturating_add(no_width).saturating_add(2))
            .saturating_add(4);

        let mut window = Self::new(width, 6).with_close_on_esc_key(true);
        window.add_control(Label::new(text, 2, 2));
        window.add_control(Button::new(yes_text, 2, 4).with_dialog_result(true));
        window.add_control(
            Button::new(no_text, width.saturating_sub(no_width + 2), 4).with_dialog_result(false),
        );
        window
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Arc<WindowTheme>) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_can_drag(mut self, can_drag: bool) -> Self {
        self.can_drag = can_drag;
        self
    }

    #[must_use]
    pub fn with_close_on_esc_key(mut self, close: bool) -> Self {
        self.close_on_esc_key = close;
        self
    }

    /// Start from `(x, y)` in the current positioning unit.
    #[must_use]
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.console.set_position(Point::new(x, y));
        self
    }

    #[inline]
    pub const fn id(&self) -> ConsoleId {
        self.console.id()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn position(&self) -> Point {
        self.console.position()
    }

    pub fn is_visible(&self) -> bool {
        self.console.is_visible()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.console.invalidate();
    }

    pub fn theme(&self) -> &Arc<WindowTheme> {
        &self.theme
    }

    /// Replace the theme. `None` is rejected and the current theme is kept.
    pub fn set_theme(&mut self, theme: Option<Arc<WindowTheme>>) -> Result<(), WindowError> {
        let theme = theme.ok_or(WindowError::InvalidArgument {
            name: "theme",
            reason: "a window theme is required",
        })?;
        self.theme = theme;
        self.console.invalidate();
        Ok(())
    }

    pub fn title_alignment(&self) -> Alignment {
        self.title_alignment
    }

    pub fn set_title_alignment(&mut self, alignment: Alignment) {
        self.title_alignment = alignment;
        self.console.invalidate();
    }

    pub fn can_drag(&self) -> bool {
        self.can_drag
    }

    /// Disabling drag also ends a drag in progress.
    pub fn set_can_drag(&mut self, can_drag: bool) {
        self.can_drag = can_drag;
        if !can_drag && self.dragging {
            self.end_drag();
        }
    }

    pub fn close_on_esc_key(&self) -> bool {
        self.close_on_esc_key
    }

    pub fn set_close_on_esc_key(&mut self, close: bool) {
        self.close_on_esc_key = close;
    }

    pub fn is_modal(&self) -> bool {
        self.modal
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Result of the last dismissal; `false` until a control sets it.
    pub fn dialog_result(&self) -> bool {
        self.dialog_result
    }

    pub fn set_dialog_result(&mut self, result: bool) {
        self.dialog_result = result;
    }

    /// Host a control. Returns its index, as reported by
    /// [`WindowEvent::ControlActivated`].
    pub fn add_control(&mut self, control: impl Control + 'static) -> usize {
        let index = self.controls.add(Box::new(control));
        self.console.invalidate();
        index
    }

    pub fn controls(&self) -> &ControlHost {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlHost {
        &mut self.controls
    }

    /// Request a redraw on the next [`draw`](Self::draw).
    pub fn invalidate(&mut self) {
        self.console.invalidate();
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    /// Make the window visible on `screen`.
    ///
    /// Showing an already visible window only raises it.
    pub fn show(&mut self, screen: &mut Screen, modal: bool) {
        let id = self.id();
        if self.console.is_visible() {
            screen.move_to_top(id);
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(window = id.get(), modal, title = %self.title, "window shown");

        self.modal = modal;
        self.dialog_result = false;
        if screen.add(id) {
            self.added_to_screen = true;
        }
        screen.move_to_top(id);
        if modal {
            screen.focus_mut().push(id);
            self.console.set_exclusive_mouse(true);
        }
        self.console.set_visible(true);
        self.console.invalidate();
        self.events.push(WindowEvent::Shown { modal });
    }

    /// Hide the window and undo what [`show`](Self::show) did.
    pub fn hide(&mut self, screen: &mut Screen) {
        if !self.console.is_visible() {
            return;
        }
        let id = self.id();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            window = id.get(),
            dialog_result = self.dialog_result,
            "window closed"
        );

        self.console.set_visible(false);
        self.console.set_exclusive_mouse(false);
        self.modal = false;
        self.dragging = false;
        self.controls.reset_input();
        if self.added_to_screen {
            screen.remove(id);
            self.added_to_screen = false;
        }
        screen.focus_mut().pop(id);
        self.events.push(WindowEvent::Closed {
            dialog_result: self.dialog_result,
        });
    }

    /// Place the window in the middle of `screen`.
    pub fn center(&mut self, screen: &Screen) {
        let (extent, own) = self.extents(screen);
        let x = i32::from(extent.width) / 2 - i32::from(own.width) / 2;
        let y = i32::from(extent.height) / 2 - i32::from(own.height) / 2;
        self.console.set_position(Point::new(x, y));
    }

    /// Screen size and window size in the current positioning unit.
    fn extents(&self, screen: &Screen) -> (Size, Size) {
        if self.console.use_pixel_positioning() {
            (screen.render_size(), self.console.pixel_size())
        } else {
            (
                screen.cells_for(self.console.font_size()),
                self.console.size(),
            )
        }
    }

    fn clamp_to_screen(&self, screen: &Screen, position: Point) -> Point {
        let (extent, own) = self.extents(screen);
        if extent.is_empty() {
            return position;
        }
        let max_x = (i32::from(extent.width) - i32::from(own.width)).max(0);
        let max_y = (i32::from(extent.height) - i32::from(own.height)).max(0);
        Point::new(position.x.clamp(0, max_x), position.y.clamp(0, max_y))
    }

    fn world_position(&self, mouse: &MouseState) -> Point {
        if self.console.use_pixel_positioning() {
            mouse.world_pixel
        } else {
            mouse.world_cell
        }
    }

    fn end_drag(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(window = self.id().get(), position = ?self.position(), "drag ended");

        self.dragging = false;
        self.console.set_exclusive_mouse(self.exclusive_before_drag);
    }

    /// Feed this frame's mouse snapshot. Returns whether the window
    /// consumed it.
    pub fn process_mouse(&mut self, screen: &mut Screen, mouse: &MouseState) -> bool {
        if !self.console.is_visible() {
            self.previous_mouse = *mouse;
            return false;
        }

        if self.dragging {
            self.previous_mouse = *mouse;
            if !mouse.left_down {
                self.end_drag();
                return true;
            }
            let target = self.world_position(mouse) - self.drag_anchor;
            let position = self.clamp_to_screen(screen, target);
            if position != self.console.position() {
                #[cfg(feature = "tracing")]
                tracing::trace!(window = self.id().get(), ?position, "window dragged");

                self.console.set_position(position);
                self.events.push(WindowEvent::Moved { position });
            }
            return true;
        }

        let local = self.console.mouse_state(mouse);
        let pressed = mouse.left_down && !self.previous_mouse.left_down;
        self.previous_mouse = *mouse;

        let title_area = self.theme.title_area(self.console.width());
        if self.can_drag
            && pressed
            && local.is_on_console
            && title_area.contains(local.cell.x, local.cell.y)
        {
            self.exclusive_before_drag = self.console.is_exclusive_mouse();
            self.console.set_exclusive_mouse(true);
            self.dragging = true;
            self.drag_anchor = if self.console.use_pixel_positioning() {
                local.pixel
            } else {
                local.cell
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(window = self.id().get(), anchor = ?self.drag_anchor, "drag started");

            return true;
        }

        let (index, action) = self.controls.process_mouse(&local);
        let handled = self.apply_control_action(screen, index, action);
        handled || self.modal
    }

    /// Feed this frame's keyboard snapshot. Returns whether the window
    /// consumed it.
    pub fn process_keyboard(&mut self, screen: &mut Screen, keys: &KeyboardState) -> bool {
        if !self.console.is_visible() {
            return false;
        }
        if self.close_on_esc_key && keys.is_key_pressed(KeyCode::Escape) {
            self.hide(screen);
            return true;
        }
        let (index, action) = self.controls.process_keyboard(keys);
        let handled = self.apply_control_action(screen, index, action);
        handled || self.modal
    }

    fn apply_control_action(
        &mut self,
        screen: &mut Screen,
        index: Option<usize>,
        action: ControlAction,
    ) -> bool {
        match (index, action) {
            (_, ControlAction::Ignored) => return false,
            (_, ControlAction::Dismiss(result)) => {
                self.dialog_result = result;
                self.hide(screen);
            }
            (Some(index), ControlAction::Activated) => {
                self.events.push(WindowEvent::ControlActivated { index });
            }
            _ => {}
        }
        if self.console.is_visible() {
            self.console.invalidate();
        }
        true
    }

    /// Repaint if needed and record this window's draw calls on `screen`.
    pub fn draw(&mut self, screen: &mut Screen) {
        if !self.console.is_visible() {
            return;
        }
        if self.console.is_dirty() {
            let theme = Arc::clone(&self.theme);
            let surface = self.console.surface_mut();
            theme.draw_frame(surface, &self.title, self.title_alignment);
            self.controls.draw(surface, &theme);
            self.console.mark_clean();
        }
        if self.modal && !self.theme.modal_tint.is_transparent() {
            screen.push_draw_call(DrawCall::Tint {
                color: self.theme.modal_tint,
                origin: Point::ZERO,
                size: screen.render_size(),
            });
        }
        screen.push_draw_call(self.console.draw_call());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::DEFAULT_FONT_SIZE;

    fn screen() -> Screen {
        // 80 x 30 cells at the default font.
        Screen::new(Size::new(640, 480))
    }

    fn at(x: i32, y: i32, left: bool) -> MouseState {
        MouseState::at_cell(Point::new(x, y), DEFAULT_FONT_SIZE).with_left(left)
    }

    #[test]
    fn new_window_is_hidden() {
        let window = Window::new(10, 5);
        assert!(!window.is_visible());
        assert!(!window.is_modal());
        assert!(window.can_drag());
        assert!(!window.close_on_esc_key());
        assert_eq!(window.title_alignment(), Alignment::Center);
    }

    #[test]
    fn set_theme_none_is_rejected() {
        let theme = Arc::new(WindowTheme::light());
        let mut window = Window::new(10, 5).with_theme(Arc::clone(&theme));
        let err = window.set_theme(None).unwrap_err();
        assert!(matches!(err, WindowError::InvalidArgument { name: "theme", .. }));
        assert!(Arc::ptr_eq(window.theme(), &theme));
    }

    #[test]
    fn show_non_modal_does_not_take_focus() {
        let mut screen = screen();
        let mut window = Window::new(10, 5);
        window.show(&mut screen, false);
        assert!(window.is_visible());
        assert!(!window.console().is_exclusive_mouse());
        assert!(screen.focus().is_empty());
        assert_eq!(screen.children(), &[window.id()]);
    }

    #[test]
    fn show_twice_only_raises() {
        let mut screen = screen();
        let mut a = Window::new(10, 5);
        let mut b = Window::new(10, 5);
        a.show(&mut screen, true);
        b.show(&mut screen, false);
        a.show(&mut screen, true);
        assert_eq!(screen.children(), &[b.id(), a.id()]);
        assert_eq!(screen.focus().len(), 1);
        assert_eq!(a.drain_events(), vec![WindowEvent::Shown { modal: true }]);
    }

    #[test]
    fn hide_leaves_foreign_child_in_place() {
        let mut screen = screen();
        let mut window = Window::new(10, 5);
        screen.add(window.id());
        window.show(&mut screen, false);
        window.hide(&mut screen);
        assert!(screen.contains(window.id()));
    }

    #[test]
    fn center_in_cells_and_pixels() {
        let screen = screen();
        let mut window = Window::new(20, 10);
        window.center(&screen);
        assert_eq!(window.position(), Point::new(30, 10));

        window.console_mut().set_use_pixel_positioning(true);
        window.center(&screen);
        assert_eq!(window.position(), Point::new(240, 160));
    }

    #[test]
    fn press_outside_title_does_not_drag() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_position(5, 5);
        window.show(&mut screen, false);
        // Border corner is outside the inset title area.
        assert!(!window.process_mouse(&mut screen, &at(5, 5, true)));
        assert!(!window.is_dragging());
        // Body row.
        window.process_mouse(&mut screen, &at(8, 7, false));
        window.process_mouse(&mut screen, &at(8, 7, true));
        assert!(!window.is_dragging());
    }

    #[test]
    fn held_button_entering_title_does_not_drag() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_position(5, 5);
        window.show(&mut screen, false);
        window.process_mouse(&mut screen, &at(0, 0, true));
        window.process_mouse(&mut screen, &at(8, 5, true));
        assert!(!window.is_dragging());
    }

    #[test]
    fn can_drag_false_blocks_drag() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_can_drag(false);
        window.show(&mut screen, false);
        window.process_mouse(&mut screen, &at(3, 0, true));
        assert!(!window.is_dragging());
    }

    #[test]
    fn drag_is_clamped_to_screen() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_position(5, 5);
        window.show(&mut screen, false);
        assert!(window.process_mouse(&mut screen, &at(8, 5, true)));
        window.process_mouse(&mut screen, &at(-20, -20, true));
        assert_eq!(window.position(), Point::ZERO);
        window.process_mouse(&mut screen, &at(200, 200, true));
        assert_eq!(window.position(), Point::new(70, 25));
    }

    #[test]
    fn drag_in_pixel_mode_uses_pixel_anchor() {
        let mut screen = screen();
        let mut window = Window::new(10, 5);
        window.console_mut().set_use_pixel_positioning(true);
        window.console_mut().set_position(Point::new(100, 100));
        window.show(&mut screen, false);

        let grab = MouseState::at_pixel(Point::new(130, 105), DEFAULT_FONT_SIZE).with_left(true);
        assert!(window.process_mouse(&mut screen, &grab));
        assert!(window.is_dragging());

        let moved = MouseState::at_pixel(Point::new(150, 125), DEFAULT_FONT_SIZE).with_left(true);
        window.process_mouse(&mut screen, &moved);
        assert_eq!(window.position(), Point::new(120, 120));
    }

    #[test]
    fn moved_event_only_on_change() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_position(5, 5);
        window.show(&mut screen, false);
        window.drain_events();
        window.process_mouse(&mut screen, &at(8, 5, true));
        window.process_mouse(&mut screen, &at(8, 5, true));
        assert!(window.drain_events().is_empty());
        window.process_mouse(&mut screen, &at(9, 6, true));
        assert_eq!(
            window.drain_events(),
            vec![WindowEvent::Moved {
                position: Point::new(6, 6)
            }]
        );
    }

    #[test]
    fn hide_cancels_drag() {
        let mut screen = screen();
        let mut window = Window::new(10, 5);
        window.show(&mut screen, false);
        window.process_mouse(&mut screen, &at(3, 0, true));
        assert!(window.is_dragging());
        window.hide(&mut screen);
        assert!(!window.is_dragging());
        assert!(!window.console().is_exclusive_mouse());
    }

    #[test]
    fn hidden_window_ignores_input() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_close_on_esc_key(true);
        assert!(!window.process_mouse(&mut screen, &at(3, 0, true)));
        let esc = KeyboardState::new().with_pressed(KeyCode::Escape);
        assert!(!window.process_keyboard(&mut screen, &esc));
        assert!(window.drain_events().is_empty());
    }

    #[test]
    fn modal_window_captures_stray_input() {
        let mut screen = screen();
        let mut window = Window::new(10, 5).with_position(5, 5);
        window.show(&mut screen, true);
        assert!(window.process_mouse(&mut screen, &at(60, 20, false)));
        assert!(window.process_keyboard(&mut screen, &KeyboardState::new()));
    }

    #[test]
    fn button_click_queues_activation() {
        let mut screen = screen();
        let mut window = Window::new(20, 5);
        let index = window.add_control(Button::new("Go", 2, 2));
        window.show(&mut screen, false);
        window.drain_events();

        assert!(window.process_mouse(&mut screen, &at(3, 2, true)));
        assert!(window.process_mouse(&mut screen, &at(3, 2, false)));
        assert_eq!(
            window.drain_events(),
            vec![WindowEvent::ControlActivated { index }]
        );
        assert!(window.is_visible());
    }

    #[test]
    fn draw_repaints_only_when_dirty() {
        let mut screen = screen();
        let mut window = Window::new(12, 4).with_title("Hi");
        window.show(&mut screen, false);
        window.draw(&mut screen);
        assert!(!window.console().is_dirty());
        assert!(window.console().surface().row_text(0).contains(" Hi "));

        window.set_title("Yo");
        assert!(window.console().is_dirty());
        window.draw(&mut screen);
        assert!(window.console().surface().row_text(0).contains(" Yo "));
    }

    #[test]
    fn hidden_window_draws_nothing() {
        let mut screen = screen();
        let mut window = Window::new(12, 4);
        window.draw(&mut screen);
        assert!(screen.draw_list().is_empty());
    }

    #[test]
    fn transparent_tint_is_skipped() {
        let mut screen = screen();
        let theme = WindowTheme::default().with_modal_tint(cellui_render::cell::PackedRgba::TRANSPARENT);
        let mut window = Window::new(12, 4).with_theme(Arc::new(theme));
        window.show(&mut screen, true);
        window.draw(&mut screen);
        assert_eq!(screen.draw_list().as_slice(), &[window.console().draw_call()]);
    }

    #[test]
    fn message_layout() {
        let window = Window::message("Saved.", "OK");
        assert_eq!(window.console().size(), Size::new(10, 6));
        assert!(window.close_on_esc_key());
        assert_eq!(window.controls().len(), 2);
        assert_eq!(window.controls().focused(), Some(1));
    }

    #[test]
    fn prompt_layout() {
        let window = Window::prompt("Quit?", "Yes", "No");
        // "< Yes >" + 2 + "< No >" + 4.
        assert_eq!(window.console().width(), 19);
        let no = window.controls().get(2).map(|c| c.area());
        assert_eq!(no.map(|a| a.right()), Some(17));
    }
}
