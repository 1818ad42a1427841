//! calsheet generates printer calibration sheets.
//!
//! A sheet is a white raster (3300x2550 px by default) with a black, unfilled rectangle of known
//! physical size (4.0 x 3.0 inches at 150 DPI, so 600x450 px) centered on it. Printing the sheet
//! and measuring the rectangle with a ruler tells whether a print or tiling pipeline preserves
//! physical scale.
//!
//! # Pipeline
//!
//! 1. **Canvas**: [`Canvas::new`] allocates the white raster
//! 2. **Rectangle**: [`place_centered`] + [`draw_stroked`] draw the border only
//! 3. **Fonts**: [`FontResolver`] walks an ordered fallback chain that always ends in a
//!    built-in bitmap face
//! 4. **Labels**: [`draw_labels`] measures and places descriptive text best-effort
//! 5. **Output**: [`write_png`] persists the raster
//!
//! [`generate`] runs all five. Label failures are logged and reported in [`LabelReport`]; they
//! never abort the sheet. Configuration and IO failures are fatal.
#![forbid(unsafe_code)]

mod canvas;
mod config;
mod foundation;
mod inspect;
mod labels;
mod measure;
mod output;
mod pipeline;
mod rectangle;
mod text;

pub use canvas::Canvas;
pub use config::{CanvasSize, DEFAULT_OUTPUT_PATH, LabelConfig, SheetConfig};
pub use foundation::core::{BLACK, Rect, Rgb8, TextBounds, WHITE};
pub use foundation::error::{CalsheetError, CalsheetResult};
pub use inspect::{
    Expect, ProbeFailure, SHEET_HEIGHT_PX, SHEET_WIDTH_PX, SheetCheck, check_image,
    is_calibration_sheet, verify_png,
};
pub use labels::{
    Anchor, LabelFailure, LabelKind, LabelReport, RECT_CLEARANCE_PX, TextLabel, anchor_x,
    draw_labels, standard_labels,
};
pub use measure::{
    MeasurementReport, PhysicalSize, ToleranceGrade, actual_dpi, assess, calibrated_scale,
    percent_error,
};
pub use output::{SheetSummary, ensure_parent_dir, write_png};
pub use pipeline::{RenderedSheet, generate, generate_with, render_sheet};
pub use rectangle::{PlacedRect, draw_stroked, place_centered};
pub use text::bitmap::BitmapFace;
pub use text::font::{FontFace, FontResolver, FontSource, OutlineFace, ResolvedFont, face_from_bytes};
pub use text::painter::{InkRgba8, RasterTextPainter, TextLayoutEngine, TextPainter};
