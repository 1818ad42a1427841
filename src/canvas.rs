use crate::foundation::{
    core::{BLACK, Rgb8, WHITE},
    math::ink_over,
};

/// White RGB raster that the pipeline draws into.
///
/// Writes outside the raster are dropped, so callers may hand in signed coordinates for text
/// that overhangs an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    img: image::RgbImage,
}

impl Canvas {
    /// Allocate a `width` x `height` raster filled with white.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: image::RgbImage::from_pixel(width, height, image::Rgb(WHITE)),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.img.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Paint the inclusive box `[x0, y0] ..= [x1, y1]`, clipped to the raster.
    pub fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb8) {
        let Some((cx0, cy0, cx1, cy1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };
        for y in cy0..=cy1 {
            for x in cx0..=cx1 {
                self.img.put_pixel(x, y, image::Rgb(color));
            }
        }
    }

    /// Composite black ink with `coverage` (0 = none, 255 = solid) at `(x, y)`.
    pub fn darken(&mut self, x: i64, y: i64, coverage: u8) {
        if coverage == 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(px) = self.img.get_pixel_mut_checked(x, y) else {
            return;
        };
        if coverage == u8::MAX {
            px.0 = BLACK;
            return;
        }
        for c in &mut px.0 {
            *c = ink_over(*c, coverage);
        }
    }

    pub fn as_image(&self) -> &image::RgbImage {
        &self.img
    }

    pub fn into_image(self) -> image::RgbImage {
        self.img
    }

    fn clip(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(u32, u32, u32, u32)> {
        let max_x = i64::from(self.width()) - 1;
        let max_y = i64::from(self.height()) - 1;
        let (x0, x1) = (x0.max(0), x1.min(max_x));
        let (y0, y1) = (y0.max(0), y1.min(max_y));
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
#[path = "../tests/unit/canvas.rs"]
mod tests;
