pub use kurbo::Rect;

/// Opaque RGB8 color.
pub type Rgb8 = [u8; 3];

/// Canvas background.
pub const WHITE: Rgb8 = [255, 255, 255];

/// Stroke and text ink.
pub const BLACK: Rgb8 = [0, 0, 0];

/// Pixel-space bounding box of a rendered string, relative to its draw origin.
///
/// Only the horizontal extent drives placement; the vertical extent is kept so callers can
/// reason about overlap with the rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBounds(pub Rect);

impl TextBounds {
    /// Bounds of a `width` x `height` box anchored at the draw origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self(Rect::new(0.0, 0.0, width, height))
    }

    /// Integer advance width used for centering (`right - left`, rounded up).
    pub fn width_px(self) -> i64 {
        self.0.width().ceil() as i64
    }

    /// Integer height (`bottom - top`, rounded up).
    pub fn height_px(self) -> i64 {
        self.0.height().ceil() as i64
    }
}
