#![forbid(unsafe_code)]

//! Raw input as the host receives it.
//!
//! Windows and controls never look at these directly. The host converts
//! whatever its backend produces into [`Event`]s and folds them into
//! per-frame snapshots with [`InputTracker`](crate::input::InputTracker).
//!
//! Positions are zero-based character cells relative to the top-left of the
//! host's render area. Conversion to pixels happens in the snapshot, where
//! the font size is known.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// One unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The render area changed size, in cells.
    Resize { width: u16, height: u16 },
    /// The host window gained (`true`) or lost focus. Losing it releases
    /// every held key and button in the tracker.
    Focus(bool),
    /// Frame boundary. Carries no input.
    Tick,
}

#[cfg(not(target_arch = "wasm32"))]
impl Event {
    /// Translate a crossterm event.
    ///
    /// Pastes and keys with no [`KeyCode`] counterpart (media keys, lone
    /// modifiers, lock keys) yield `None`.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        Some(match event {
            cte::Event::Key(key) => Self::Key(KeyEvent {
                code: KeyCode::from_crossterm(key.code)?,
                modifiers: key.modifiers.into(),
                kind: key.kind.into(),
            }),
            cte::Event::Mouse(mouse) => Self::Mouse(mouse.into()),
            cte::Event::Resize(width, height) => Self::Resize { width, height },
            cte::Event::FocusGained => Self::Focus(true),
            cte::Event::FocusLost => Self::Focus(false),
            cte::Event::Paste(_) => return None,
        })
    }
}

/// A key going down, auto-repeating or coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain press of `code`.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Keys a window or control can react to.
///
/// Only `Escape`, `Tab`, `BackTab`, `Enter` and `Char(' ')` drive built-in
/// behaviour. The rest are tracked so host code can query them from a
/// [`KeyboardState`](crate::input::KeyboardState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab. Terminals report it as its own key.
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyCode {
    fn from_crossterm(code: cte::KeyCode) -> Option<Self> {
        use cte::KeyCode as K;
        let code = match code {
            K::Char(c) => Self::Char(c),
            K::Esc => Self::Escape,
            K::Enter => Self::Enter,
            K::Tab => Self::Tab,
            K::BackTab => Self::BackTab,
            K::Backspace => Self::Backspace,
            K::Delete => Self::Delete,
            K::Insert => Self::Insert,
            K::Up => Self::Up,
            K::Down => Self::Down,
            K::Left => Self::Left,
            K::Right => Self::Right,
            K::Home => Self::Home,
            K::End => Self::End,
            K::PageUp => Self::PageUp,
            K::PageDown => Self::PageDown,
            K::F(n) => Self::F(n),
            _ => return None,
        };
        Some(code)
    }
}

/// Backends that cannot tell the kinds apart report everything as `Press`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::KeyEventKind> for KeyEventKind {
    fn from(kind: cte::KeyEventKind) -> Self {
        match kind {
            cte::KeyEventKind::Press => Self::Press,
            cte::KeyEventKind::Repeat => Self::Repeat,
            cte::KeyEventKind::Release => Self::Release,
        }
    }
}

bitflags! {
    /// Modifier keys held alongside a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Any of Super, Hyper or Meta.
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::KeyModifiers> for Modifiers {
    fn from(held: cte::KeyModifiers) -> Self {
        const TABLE: [(cte::KeyModifiers, Modifiers); 6] = [
            (cte::KeyModifiers::SHIFT, Modifiers::SHIFT),
            (cte::KeyModifiers::ALT, Modifiers::ALT),
            (cte::KeyModifiers::CONTROL, Modifiers::CTRL),
            (cte::KeyModifiers::SUPER, Modifiers::SUPER),
            (cte::KeyModifiers::HYPER, Modifiers::SUPER),
            (cte::KeyModifiers::META, Modifiers::SUPER),
        ];
        TABLE
            .iter()
            .filter(|(from, _)| held.contains(*from))
            .fold(Self::NONE, |acc, (_, to)| acc | *to)
    }
}

/// A pointer event at cell `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::MouseEvent> for MouseEvent {
    fn from(event: cte::MouseEvent) -> Self {
        let kind = match event.kind {
            cte::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
            cte::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
            cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(b.into()),
            cte::MouseEventKind::Moved => MouseEventKind::Moved,
            cte::MouseEventKind::ScrollUp => MouseEventKind::Scroll { dx: 0, dy: -1 },
            cte::MouseEventKind::ScrollDown => MouseEventKind::Scroll { dx: 0, dy: 1 },
            cte::MouseEventKind::ScrollLeft => MouseEventKind::Scroll { dx: -1, dy: 0 },
            cte::MouseEventKind::ScrollRight => MouseEventKind::Scroll { dx: 1, dy: 0 },
        };
        Self::new(kind, event.column, event.row).with_modifiers(event.modifiers.into())
    }
}

/// What the pointer did.
///
/// The tracker only turns `Down`, `Up` and `Drag` into button state. Every
/// kind moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Motion with `button` held.
    Drag(MouseButton),
    /// Motion with no button held.
    Moved,
    /// One wheel notch. Negative `dy` is away from the user.
    Scroll { dx: i8, dy: i8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<cte::MouseButton> for MouseButton {
    fn from(button: cte::MouseButton) -> Self {
        match button {
            cte::MouseButton::Left => Self::Left,
            cte::MouseButton::Right => Self::Right,
            cte::MouseButton::Middle => Self::Middle,
        }
    }
}
