#![forbid(unsafe_code)]

//! Host console: a positioned, showable cell surface.
//!
//! [`Console`] is the piece every on-screen object shares: where it sits,
//! whether it is visible, whether it currently owns the mouse exclusively,
//! and whether its surface needs a redraw. Widgets such as
//! [`Window`](crate::window::Window) compose a console rather than extend it.
//!
//! A console is positioned in cells by default. With pixel positioning on,
//! [`Console::position`] is interpreted in pixels and the font size maps
//! between the two.

use cellui_core::geometry::{Point, Size};
use cellui_core::input::MouseState;
use cellui_render::draw::DrawCall;
use cellui_render::surface::{Surface, SurfaceId};

/// Identity of a console; the id of its surface.
pub type ConsoleId = SurfaceId;

/// Default pixel size of one cell.
pub const DEFAULT_FONT_SIZE: Size = Size::new(8, 16);

/// A [`MouseState`] translated into one console's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsoleMouse {
    /// Console-relative cell under the pointer (may be outside the console).
    pub cell: Point,
    /// Console-relative pixel under the pointer.
    pub pixel: Point,
    /// The world snapshot this was derived from.
    pub world: MouseState,
    /// Whether `cell` lies inside the console.
    pub is_on_console: bool,
}

impl ConsoleMouse {
    #[inline]
    pub const fn left_down(&self) -> bool {
        self.world.left_down
    }
}

/// Positioned cell surface with visibility and input-capture flags.
#[derive(Debug)]
pub struct Console {
    surface: Surface,
    position: Point,
    font_size: Size,
    use_pixel_positioning: bool,
    visible: bool,
    exclusive_mouse: bool,
    dirty: bool,
}

impl Console {
    /// Create a visible console of `width` x `height` cells at the origin.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            surface: Surface::new(width, height),
            position: Point::ZERO,
            font_size: DEFAULT_FONT_SIZE,
            use_pixel_positioning: false,
            visible: true,
            exclusive_mouse: false,
            dirty: true,
        }
    }

    #[inline]
    pub const fn id(&self) -> ConsoleId {
        self.surface.id()
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.surface.width()
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.surface.height()
    }

    /// Size in cells.
    #[inline]
    pub const fn size(&self) -> Size {
        self.surface.size()
    }

    /// Size in pixels under the current font.
    pub fn pixel_size(&self) -> Size {
        Size::new(
            self.width().saturating_mul(self.font_size.width),
            self.height().saturating_mul(self.font_size.height),
        )
    }

    /// Position in cells, or in pixels with pixel positioning on.
    #[inline]
    pub const fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    #[inline]
    pub const fn font_size(&self) -> Size {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: Size) {
        self.font_size = font_size;
    }

    #[inline]
    pub const fn use_pixel_positioning(&self) -> bool {
        self.use_pixel_positioning
    }

    pub fn set_use_pixel_positioning(&mut self, on: bool) {
        self.use_pixel_positioning = on;
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether this console receives all mouse input while set.
    #[inline]
    pub const fn is_exclusive_mouse(&self) -> bool {
        self.exclusive_mouse
    }

    pub fn set_exclusive_mouse(&mut self, exclusive: bool) {
        self.exclusive_mouse = exclusive;
    }

    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a redraw on the next draw pass.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Top-left corner in pixels.
    pub fn pixel_origin(&self) -> Point {
        if self.use_pixel_positioning {
            self.position
        } else {
            self.position.scale(self.font_size)
        }
    }

    /// Translate a world mouse snapshot into this console's space.
    pub fn mouse_state(&self, mouse: &MouseState) -> ConsoleMouse {
        let pixel = mouse.world_pixel - self.pixel_origin();
        let cell = if self.use_pixel_positioning {
            pixel.cell_of(self.font_size)
        } else {
            mouse.world_cell - self.position
        };
        ConsoleMouse {
            cell,
            pixel,
            world: *mouse,
            is_on_console: self.surface.bounds().contains_point(cell),
        }
    }

    /// The draw call that blits this console's surface.
    pub fn draw_call(&self) -> DrawCall {
        DrawCall::Surface {
            id: self.id(),
            origin: self.pixel_origin(),
            cell_size: self.font_size,
        }
    }
}
