use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::SheetConfig,
    foundation::{core::Rgb8, error::CalsheetResult},
    rectangle::{PlacedRect, place_centered},
};

/// Reference sheet size; either orientation counts.
pub const SHEET_WIDTH_PX: u32 = 3300;
pub const SHEET_HEIGHT_PX: u32 = 2550;

/// Whether an image of this size is a calibration sheet, possibly rotated by 90 degrees.
pub fn is_calibration_sheet(width: u32, height: u32) -> bool {
    (width, height) == (SHEET_WIDTH_PX, SHEET_HEIGHT_PX)
        || (width, height) == (SHEET_HEIGHT_PX, SHEET_WIDTH_PX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    Ink,
    Paper,
}

impl Expect {
    fn matches(self, px: Rgb8) -> bool {
        match self {
            Expect::Ink => px.iter().all(|&c| c < 128),
            Expect::Paper => px.iter().all(|&c| c >= 128),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeFailure {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub expected: Expect,
    pub actual: Rgb8,
}

/// Result of checking a decoded sheet against its config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetCheck {
    pub width: u32,
    pub height: u32,
    pub rect: Option<PlacedRect>,
    pub dimension_mismatch: bool,
    pub failures: Vec<ProbeFailure>,
}

impl SheetCheck {
    pub fn is_ok(&self) -> bool {
        !self.dimension_mismatch && self.failures.is_empty()
    }
}

impl std::fmt::Display for SheetCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dimension_mismatch {
            return write!(f, "unexpected dimensions {} x {}", self.width, self.height);
        }
        if self.failures.is_empty() {
            return write!(f, "ok ({} x {})", self.width, self.height);
        }
        write!(f, "{} probe(s) failed:", self.failures.len())?;
        for p in &self.failures {
            write!(
                f,
                " {} at ({}, {}) expected {:?} got {:?};",
                p.name, p.x, p.y, p.expected, p.actual
            )?;
        }
        Ok(())
    }
}

/// Check an in-memory sheet: dimensions, black outer corners and stroke band, white center.
pub fn check_image(img: &image::RgbImage, cfg: &SheetConfig) -> CalsheetResult<SheetCheck> {
    let (width, height) = img.dimensions();
    let mut check = SheetCheck {
        width,
        height,
        rect: None,
        dimension_mismatch: (width, height) != (cfg.canvas.width, cfg.canvas.height),
        failures: Vec::new(),
    };
    if check.dimension_mismatch {
        return Ok(check);
    }

    let (rect_w, rect_h) = cfg.rect_size_px();
    let rect = place_centered(width, height, rect_w, rect_h, cfg.stroke_px)?;
    check.rect = Some(rect);

    for (name, x, y, expected) in probes(&rect) {
        let actual = img.get_pixel(x, y).0;
        if !expected.matches(actual) {
            check.failures.push(ProbeFailure {
                name: name.to_string(),
                x,
                y,
                expected,
                actual,
            });
        }
    }
    Ok(check)
}

/// Decode the PNG at `path` and run [`check_image`] on it.
pub fn verify_png(path: &Path, cfg: &SheetConfig) -> CalsheetResult<SheetCheck> {
    let img = image::open(path)
        .with_context(|| format!("open sheet '{}'", path.display()))?
        .to_rgb8();
    check_image(&img, cfg)
}

fn probes(rect: &PlacedRect) -> Vec<(&'static str, u32, u32, Expect)> {
    let s = rect.stroke_px;
    let [tl, tr, br, bl] = rect.corners();
    let (cx, cy) = rect.center();
    vec![
        ("top-left corner", tl.0, tl.1, Expect::Ink),
        ("top-right corner", tr.0, tr.1, Expect::Ink),
        ("bottom-right corner", br.0, br.1, Expect::Ink),
        ("bottom-left corner", bl.0, bl.1, Expect::Ink),
        ("top band inner row", cx, rect.y + s - 1, Expect::Ink),
        ("bottom band inner row", cx, rect.bottom() + 1 - s, Expect::Ink),
        ("right band inner column", rect.right() + 1 - s, cy, Expect::Ink),
        ("inside top-left", rect.x + s, rect.y + s, Expect::Paper),
        ("inside bottom-right", rect.right() - s, rect.bottom() - s, Expect::Paper),
        ("center", cx, cy, Expect::Paper),
    ]
}

#[cfg(test)]
#[path = "../tests/unit/inspect.rs"]
mod tests;
