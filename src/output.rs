use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{canvas::Canvas, foundation::error::CalsheetResult};

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Path) -> CalsheetResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `canvas` to `path` as PNG.
///
/// The file handle is flushed explicitly so write errors surface here instead of being lost
/// on drop. A failed write may leave a partial file behind.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_png(canvas: &Canvas, path: &Path) -> CalsheetResult<()> {
    ensure_parent_dir(path)?;

    let f = File::create(path).with_context(|| format!("create png '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    canvas
        .as_image()
        .write_to(&mut w, image::ImageFormat::Png)
        .with_context(|| format!("encode png '{}'", path.display()))?;
    w.flush()
        .with_context(|| format!("flush png '{}'", path.display()))?;

    tracing::info!(width = canvas.width(), height = canvas.height(), "wrote calibration sheet");
    Ok(())
}

/// Human-readable legend for manually verifying a printed sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetSummary {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rect_width_px: u32,
    pub rect_height_px: u32,
    pub rect_width_in: f64,
    pub rect_height_in: f64,
    pub dpi: u32,
    pub stroke_px: u32,
    pub labels_placed: usize,
    pub labels_total: usize,
}

impl std::fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Calibration image saved to: {}",
            self.output_path.display()
        )?;
        writeln!(
            f,
            "Image dimensions: {} x {} pixels",
            self.width, self.height
        )?;
        writeln!(
            f,
            "Rectangle dimensions: {} x {} pixels ({:.1} x {:.1} inches at {} DPI)",
            self.rect_width_px, self.rect_height_px, self.rect_width_in, self.rect_height_in, self.dpi
        )?;
        writeln!(
            f,
            "Rectangle style: black outline (no fill), {} px stroke",
            self.stroke_px
        )?;
        write!(
            f,
            "Labels: {} of {} placed",
            self.labels_placed, self.labels_total
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/output.rs"]
mod tests;
