use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{CalsheetError, CalsheetResult},
    text::font::FontSource,
};

/// Where the sheet lands when no output path is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "src/main/resources/calibration/calibration.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Raster size in pixels.
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 3300,
            height: 2550,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Sizes and offsets of the descriptive labels.
pub struct LabelConfig {
    /// Draw labels at all. The rectangle is drawn regardless.
    pub enabled: bool,
    /// Pixel size of the title and the instruction line.
    pub title_size_px: f32,
    /// Pixel size of the width and height captions.
    pub caption_size_px: f32,
    /// Pixel size of the measurement tip.
    pub tip_size_px: f32,
    /// Top of the title, from the top of the canvas.
    pub title_y: i64,
    /// Gap between the rectangle bottom and the instruction line.
    pub instruction_gap_px: i64,
    /// Gap between the rectangle bottom and the measurement tip.
    pub tip_gap_px: i64,
    /// Distance from the width caption's top to the rectangle top.
    pub width_caption_gap_px: i64,
    /// Distance from the height caption's left edge to the rectangle's left edge.
    pub height_caption_offset_px: i64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title_size_px: 40.0,
            caption_size_px: 30.0,
            tip_size_px: 24.0,
            title_y: 100,
            instruction_gap_px: 50,
            tip_gap_px: 100,
            width_caption_gap_px: 40,
            height_caption_offset_px: 120,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Immutable description of one calibration sheet.
///
/// `Default` is the reference sheet: 3300x2550 px with a 4.0 x 3.0 inch rectangle at 150 DPI
/// drawn with a 3 px stroke.
pub struct SheetConfig {
    /// Raster size.
    pub canvas: CanvasSize,
    /// Pixels per inch used to size the rectangle.
    pub dpi: u32,
    /// Rectangle width in inches.
    pub rect_width_in: f64,
    /// Rectangle height in inches.
    pub rect_height_in: f64,
    /// Border thickness in pixels.
    pub stroke_px: u32,
    /// Destination PNG.
    pub output_path: PathBuf,
    /// Ordered font candidates; the built-in bitmap face always follows them.
    pub fonts: Vec<FontSource>,
    /// Label sizes and offsets.
    pub labels: LabelConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            dpi: 150,
            rect_width_in: 4.0,
            rect_height_in: 3.0,
            stroke_px: 3,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fonts: FontSource::default_chain(),
            labels: LabelConfig::default(),
        }
    }
}

impl SheetConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CalsheetResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let r = BufReader::new(f);
        let cfg: SheetConfig = serde_json::from_reader(r)
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Rectangle size in pixels (`inches * dpi`, rounded).
    pub fn rect_size_px(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.rect_width_in * dpi).round().max(0.0) as u32,
            (self.rect_height_in * dpi).round().max(0.0) as u32,
        )
    }

    /// Reject configurations that cannot produce a correct sheet.
    ///
    /// A rectangle that does not fit strictly inside the canvas is an error, never clipped.
    pub fn validate(&self) -> CalsheetResult<()> {
        let CanvasSize { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(CalsheetError::validation("canvas width and height must be > 0"));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(3))
            .ok_or_else(|| CalsheetError::validation("canvas byte size overflows usize"))?;

        if self.dpi == 0 {
            return Err(CalsheetError::validation("dpi must be > 0"));
        }
        for (name, v) in [
            ("rect_width_in", self.rect_width_in),
            ("rect_height_in", self.rect_height_in),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CalsheetError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }

        let (rect_w, rect_h) = self.rect_size_px();
        if rect_w == 0 || rect_h == 0 {
            return Err(CalsheetError::validation(
                "rectangle rounds to zero pixels at this dpi",
            ));
        }
        if rect_w >= width || rect_h >= height {
            return Err(CalsheetError::validation(format!(
                "rectangle {rect_w}x{rect_h} px does not fit inside canvas {width}x{height} px"
            )));
        }

        if self.stroke_px == 0 {
            return Err(CalsheetError::validation("stroke_px must be > 0"));
        }
        if self.stroke_px.saturating_mul(2) > rect_w.min(rect_h) {
            return Err(CalsheetError::validation(
                "stroke_px is too thick for the rectangle",
            ));
        }

        let labels = &self.labels;
        for (name, v) in [
            ("title_size_px", labels.title_size_px),
            ("caption_size_px", labels.caption_size_px),
            ("tip_size_px", labels.tip_size_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CalsheetError::validation(format!(
                    "labels.{name} must be finite and > 0"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
