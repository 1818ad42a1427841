use crate::{
    canvas::Canvas,
    foundation::{
        core::BLACK,
        error::{CalsheetError, CalsheetResult},
    },
};

/// The calibration rectangle in canvas pixels.
///
/// Outer edges sit at `x`, `y`, `x + width` and `y + height` (all inclusive); the stroke band
/// grows inward from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub stroke_px: u32,
}

impl PlacedRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// The four outer corners, clockwise from top-left.
    pub fn corners(&self) -> [(u32, u32); 4] {
        [
            (self.x, self.y),
            (self.right(), self.y),
            (self.right(), self.bottom()),
            (self.x, self.bottom()),
        ]
    }

    /// Whether `(px, py)` lies inside the stroke band.
    pub fn is_border(&self, px: u32, py: u32) -> bool {
        if px < self.x || py < self.y || px > self.right() || py > self.bottom() {
            return false;
        }
        let s = self.stroke_px;
        px < self.x + s || py < self.y + s || px + s > self.right() || py + s > self.bottom()
    }

    /// Whether `(px, py)` lies strictly inside the stroke band.
    pub fn is_interior(&self, px: u32, py: u32) -> bool {
        let s = self.stroke_px;
        px >= self.x + s && py >= self.y + s && px + s <= self.right() && py + s <= self.bottom()
    }

    /// Whether the inclusive box `[x0, y0] ..= [x1, y1]` reaches any interior pixel.
    pub fn overlaps_interior(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
        let s = i64::from(self.stroke_px);
        let (ix0, iy0) = (i64::from(self.x) + s, i64::from(self.y) + s);
        let (ix1, iy1) = (i64::from(self.right()) - s, i64::from(self.bottom()) - s);
        x0 <= ix1 && x1 >= ix0 && y0 <= iy1 && y1 >= iy0
    }
}

/// Center a `rect_w` x `rect_h` rectangle on the canvas using floor division.
///
/// Fails when the rectangle does not fit strictly inside the canvas or the stroke is unusable.
pub fn place_centered(
    canvas_w: u32,
    canvas_h: u32,
    rect_w: u32,
    rect_h: u32,
    stroke_px: u32,
) -> CalsheetResult<PlacedRect> {
    if rect_w == 0 || rect_h == 0 {
        return Err(CalsheetError::validation("rectangle must be at least 1x1 px"));
    }
    if rect_w >= canvas_w || rect_h >= canvas_h {
        return Err(CalsheetError::validation(format!(
            "rectangle {rect_w}x{rect_h} px does not fit inside canvas {canvas_w}x{canvas_h} px"
        )));
    }
    if stroke_px == 0 || stroke_px.saturating_mul(2) > rect_w.min(rect_h) {
        return Err(CalsheetError::validation(format!(
            "stroke {stroke_px} px is unusable for a {rect_w}x{rect_h} px rectangle"
        )));
    }

    Ok(PlacedRect {
        x: (canvas_w - rect_w) / 2,
        y: (canvas_h - rect_h) / 2,
        width: rect_w,
        height: rect_h,
        stroke_px,
    })
}

/// Draw the rectangle's border in black. The interior is left untouched.
pub fn draw_stroked(canvas: &mut Canvas, rect: &PlacedRect) {
    let (x0, y0) = (i64::from(rect.x), i64::from(rect.y));
    let (x1, y1) = (i64::from(rect.right()), i64::from(rect.bottom()));
    let s = i64::from(rect.stroke_px);

    // top, bottom, left, right bands
    canvas.fill_span(x0, y0, x1, y0 + s - 1, BLACK);
    canvas.fill_span(x0, y1 - s + 1, x1, y1, BLACK);
    canvas.fill_span(x0, y0, x0 + s - 1, y1, BLACK);
    canvas.fill_span(x1 - s + 1, y0, x1, y1, BLACK);
}

#[cfg(test)]
#[path = "../tests/unit/rectangle.rs"]
mod tests;
