#![forbid(unsafe_code)]

//! Cell and colour primitives.

/// An RGBA colour packed into a `u32` as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// True when the alpha channel is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Same colour with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

/// A single grid cell: one glyph plus foreground and background colours.
///
/// The default cell is a space, white on transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
}

impl Cell {
    /// Placeholder for the trailing columns of a wide grapheme.
    pub const CONTINUATION: Self = Self::from_char('\0');

    /// A cell with the given glyph and default colours.
    #[inline]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
        }
    }

    /// Set the foreground colour (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// True for the trailing cell of a wide grapheme.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION.ch
    }

    /// True for a blank cell (space glyph).
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}
