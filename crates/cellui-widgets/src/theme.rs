#![forbid(unsafe_code)]

//! Window theme: colours, border glyphs, title-area geometry, modal tint.
//!
//! A [`WindowTheme`] is shared between windows behind an `Arc`; changing a
//! window's look means handing it a different theme and letting it redraw.
//!
//! # Example
//! ```
//! use cellui_widgets::theme::WindowTheme;
//!
//! let theme = WindowTheme::dark();
//! let area = theme.title_area(20);
//! assert_eq!((area.x, area.y, area.length), (1, 0, 18));
//! ```

use std::env;

use cellui_render::cell::{Cell, PackedRgba};
use cellui_render::surface::Surface;
use unicode_width::UnicodeWidthStr;

/// Horizontal alignment of a window title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    /// Align text to the left.
    Left,
    /// Center text horizontally.
    Center,
    /// Align text to the right.
    Right,
}

/// Glyphs used to draw a window border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderSet {
    /// Single-line box drawing.
    pub const SINGLE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Double-line box drawing.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    /// Plain ASCII, for fonts without box-drawing glyphs.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Console-relative region of the title bar used to start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitleArea {
    /// First column (inclusive).
    pub x: u16,
    /// Row of the title bar.
    pub y: u16,
    /// Number of columns; zero disables dragging.
    pub length: u16,
}

impl TitleArea {
    /// Whether console-relative cell (x, y) lies inside the area.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let start = i32::from(self.x);
        self.length != 0
            && y == i32::from(self.y)
            && x >= start
            && x < start + i32::from(self.length)
    }
}

/// Look of a window and the controls it hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTheme {
    pub foreground: PackedRgba,
    pub background: PackedRgba,
    pub border: PackedRgba,
    pub border_set: BorderSet,
    pub title_fg: PackedRgba,
    pub title_bg: PackedRgba,
    /// Columns kept free on each side of the title bar (the corners).
    pub title_inset: u16,
    /// Row holding the title bar.
    pub title_row: u16,
    /// Colour blended over the whole screen behind a modal window.
    /// Fully transparent disables the tint.
    pub modal_tint: PackedRgba,
    pub button_fg: PackedRgba,
    pub button_bg: PackedRgba,
    pub button_focused_fg: PackedRgba,
    pub button_focused_bg: PackedRgba,
}

impl Default for WindowTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl WindowTheme {
    /// Light-on-dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            foreground: PackedRgba::rgb(220, 220, 220),
            background: PackedRgba::rgb(24, 28, 40),
            border: PackedRgba::rgb(110, 130, 170),
            border_set: BorderSet::SINGLE,
            title_fg: PackedRgba::rgb(24, 28, 40),
            title_bg: PackedRgba::rgb(110, 130, 170),
            title_inset: 1,
            title_row: 0,
            modal_tint: PackedRgba::rgba(0, 0, 0, 150),
            button_fg: PackedRgba::rgb(220, 220, 220),
            button_bg: PackedRgba::rgb(50, 58, 80),
            button_focused_fg: PackedRgba::rgb(24, 28, 40),
            button_focused_bg: PackedRgba::rgb(230, 190, 90),
        }
    }

    /// Dark-on-light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            foreground: PackedRgba::rgb(30, 30, 30),
            background: PackedRgba::rgb(236, 236, 230),
            border: PackedRgba::rgb(80, 90, 110),
            border_set: BorderSet::SINGLE,
            title_fg: PackedRgba::rgb(250, 250, 250),
            title_bg: PackedRgba::rgb(80, 90, 110),
            title_inset: 1,
            title_row: 0,
            modal_tint: PackedRgba::rgba(255, 255, 255, 120),
            button_fg: PackedRgba::rgb(30, 30, 30),
            button_bg: PackedRgba::rgb(200, 200, 195),
            button_focused_fg: PackedRgba::rgb(250, 250, 250),
            button_focused_bg: PackedRgba::rgb(40, 90, 170),
        }
    }

    /// Pick [`dark`](Self::dark) or [`light`](Self::light) from the
    /// terminal's `COLORFGBG` variable.
    #[must_use]
    pub fn from_env() -> Self {
        if Self::detect_dark_mode() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Detect whether dark mode should be used.
    ///
    /// Reads `COLORFGBG` and defaults to dark when it is absent.
    #[must_use]
    pub fn detect_dark_mode() -> bool {
        Self::detect_dark_mode_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
    }

    fn detect_dark_mode_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
        // "fg;bg" as ANSI indices; 7 and 15 are light backgrounds.
        if let Some(colorfgbg) = colorfgbg
            && let Some(bg_part) = colorfgbg.split(';').next_back()
            && let Ok(bg) = bg_part.trim().parse::<u8>()
        {
            return bg != 7 && bg != 15;
        }
        true
    }

    /// Set the border glyphs (builder pattern).
    #[must_use]
    pub fn with_border_set(mut self, border_set: BorderSet) -> Self {
        self.border_set = border_set;
        self
    }

    /// Set the modal tint (builder pattern).
    #[must_use]
    pub fn with_modal_tint(mut self, tint: PackedRgba) -> Self {
        self.modal_tint = tint;
        self
    }

    /// Set the title inset (builder pattern).
    #[must_use]
    pub fn with_title_inset(mut self, inset: u16) -> Self {
        self.title_inset = inset;
        self
    }

    /// Title-bar geometry for a window `width` columns wide.
    #[must_use]
    pub fn title_area(&self, width: u16) -> TitleArea {
        TitleArea {
            x: self.title_inset,
            y: self.title_row,
            length: width.saturating_sub(self.title_inset.saturating_mul(2)),
        }
    }

    /// Paint background, border, and title onto a window surface.
    pub fn draw_frame(&self, surface: &mut Surface, title: &str, alignment: Alignment) {
        let body = Cell::from_char(' ')
            .with_fg(self.foreground)
            .with_bg(self.background);
        surface.clear_with(body);
        self.draw_border(surface);
        self.draw_title(surface, title, alignment);
    }

    fn border_cell(&self, ch: char) -> Cell {
        Cell::from_char(ch)
            .with_fg(self.border)
            .with_bg(self.background)
    }

    fn draw_border(&self, surface: &mut Surface) {
        let area = surface.bounds();
        if area.is_empty() {
            return;
        }
        let set = self.border_set;
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        for y in area.y..area.bottom() {
            surface.set(area.x, y, self.border_cell(set.vertical));
            surface.set(right, y, self.border_cell(set.vertical));
        }
        for x in area.x..area.right() {
            surface.set(x, area.y, self.border_cell(set.horizontal));
            surface.set(x, bottom, self.border_cell(set.horizontal));
        }

        // Corners last so they overwrite the edges.
        surface.set(area.x, area.y, self.border_cell(set.top_left));
        surface.set(right, area.y, self.border_cell(set.top_right));
        surface.set(area.x, bottom, self.border_cell(set.bottom_left));
        surface.set(right, bottom, self.border_cell(set.bottom_right));
    }

    fn draw_title(&self, surface: &mut Surface, title: &str, alignment: Alignment) {
        let area = self.title_area(surface.width());
        let title = title.trim();
        if area.length == 0 || title.is_empty() {
            return;
        }

        let available = area.length as usize;
        let bare_width = UnicodeWidthStr::width(title);
        let padded;
        let text = if bare_width + 2 <= available {
            padded = format!(" {title} ");
            padded.as_str()
        } else {
            title
        };
        let display_width = UnicodeWidthStr::width(text).min(available);

        let x = match alignment {
            Alignment::Left => area.x as usize,
            Alignment::Center => area.x as usize + (available - display_width) / 2,
            Alignment::Right => area.x as usize + available - display_width,
        } as u16;
        let max_x = area.x.saturating_add(area.length);
        surface.print(x, area.y, text, self.title_fg, self.title_bg, max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_area_geometry() {
        let theme = WindowTheme::default();
        assert_eq!(
            theme.title_area(10),
            TitleArea {
                x: 1,
                y: 0,
                length: 8
            }
        );
        assert_eq!(theme.title_area(2).length, 0);
        assert_eq!(theme.title_area(0).length, 0);
    }

    #[test]
    fn title_area_contains() {
        let area = TitleArea {
            x: 1,
            y: 0,
            length: 3,
        };
        assert!(area.contains(1, 0));
        assert!(area.contains(3, 0));
        assert!(!area.contains(0, 0));
        assert!(!area.contains(4, 0));
        assert!(!area.contains(2, 1));
        assert!(!TitleArea::default().contains(0, 0));
    }

    #[test]
    fn colorfgbg_detection() {
        assert!(WindowTheme::detect_dark_mode_from_colorfgbg(None));
        assert!(WindowTheme::detect_dark_mode_from_colorfgbg(Some("15;0")));
        assert!(!WindowTheme::detect_dark_mode_from_colorfgbg(Some("0;15")));
        assert!(!WindowTheme::detect_dark_mode_from_colorfgbg(Some("0;default;7")));
        assert!(WindowTheme::detect_dark_mode_from_colorfgbg(Some("garbage")));
    }

    #[test]
    fn wide_title_leaves_no_border_under_it() {
        let theme = WindowTheme::dark().with_border_set(BorderSet::ASCII);
        let mut surface = Surface::new(12, 3);
        theme.draw_frame(&mut surface, "日本", Alignment::Left);
        assert_eq!(surface.row_text(0), "+ 日本 ----+");
        assert!(surface.get(3, 0).is_some_and(|c| c.is_continuation()));
        assert!(surface.get(5, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn frame_draws_border_and_left_title() {
        let theme = WindowTheme::dark().with_border_set(BorderSet::ASCII);
        let mut surface = Surface::new(12, 3);
        theme.draw_frame(&mut surface, "Hi", Alignment::Left);
        assert_eq!(surface.row_text(0), "+ Hi ------+");
        assert_eq!(surface.row_text(1), "|          |");
        assert_eq!(surface.row_text(2), "+----------+");
    }

    #[test]
    fn title_alignment_center_and_right() {
        let theme = WindowTheme::dark().with_border_set(BorderSet::ASCII);
        let mut surface = Surface::new(12, 3);
        theme.draw_frame(&mut surface, "Hi", Alignment::Center);
        assert_eq!(surface.row_text(0), "+--- Hi ---+");

        theme.draw_frame(&mut surface, "Hi", Alignment::Right);
        assert_eq!(surface.row_text(0), "+------ Hi +");
    }

    #[test]
    fn long_title_is_truncated_without_padding() {
        let theme = WindowTheme::dark().with_border_set(BorderSet::ASCII);
        let mut surface = Surface::new(6, 3);
        theme.draw_frame(&mut surface, "Overflowing", Alignment::Center);
        assert_eq!(surface.row_text(0), "+Over+");
    }

    #[test]
    fn title_uses_title_colours() {
        let theme = WindowTheme::dark();
        let mut surface = Surface::new(10, 3);
        theme.draw_frame(&mut surface, "T", Alignment::Left);
        let cell = surface.get(2, 0).copied().unwrap_or_default();
        assert_eq!(cell.ch, 'T');
        assert_eq!(cell.fg, theme.title_fg);
        assert_eq!(cell.bg, theme.title_bg);
    }
}
