/// The drawing-surface contract the scenes render through
///
/// A backend owns whatever native window and renderer it needs. Creating the
/// backend value acquires them; dropping it releases them. Nothing else in
/// the core touches platform state.
use crate::error::SurfaceError;
use crate::geometry::{Rect, ScreenPoint};

/// An RGBA draw color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }
}

/// Keys the scenes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Other,
}

/// Input delivered by a surface's event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Immediate-mode drawing target with an event queue
pub trait DrawSurface {
    /// Color used by subsequent clear, line and rect calls
    fn set_draw_color(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Fill the whole surface with the current draw color
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Draw a one-pixel line. Endpoints outside the surface are clipped.
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) -> Result<(), SurfaceError>;

    fn fill_rect(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    /// Flush the back buffer to the visible surface
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError>;
}

impl<T: DrawSurface + ?Sized> DrawSurface for &mut T {
    fn set_draw_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        (**self).set_draw_color(color)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        (**self).clear()
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint) -> Result<(), SurfaceError> {
        (**self).draw_line(from, to)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        (**self).fill_rect(rect)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        (**self).present()
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        (**self).poll_event()
    }
}
