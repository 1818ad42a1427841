use crate::{
    canvas::Canvas,
    config::SheetConfig,
    foundation::{
        core::TextBounds,
        error::{CalsheetError, CalsheetResult},
        math::half_floor,
    },
    rectangle::PlacedRect,
    text::{font::FontResolver, painter::TextPainter},
};

/// Minimum gap between a label placed beside the rectangle and its outer edge.
pub const RECT_CLEARANCE_PX: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Title,
    Instruction,
    WidthCaption,
    HeightCaption,
    MeasurementTip,
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LabelKind::Title => "title",
            LabelKind::Instruction => "instruction",
            LabelKind::WidthCaption => "width caption",
            LabelKind::HeightCaption => "height caption",
            LabelKind::MeasurementTip => "measurement tip",
        };
        f.write_str(name)
    }
}

/// Horizontal placement rule for a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Centered across the full canvas width.
    CanvasCentered,
    /// Centered across the rectangle's width.
    RectCentered,
    /// Left edge `offset_px` to the left of the rectangle's left edge, moved further left when
    /// the text would otherwise come within [`RECT_CLEARANCE_PX`] of the rectangle.
    LeftOfRect { offset_px: i64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub kind: LabelKind,
    pub text: String,
    pub size_px: f32,
    pub anchor: Anchor,
    /// Top of the label in canvas pixels.
    pub y: i64,
}

/// The five labels of a calibration sheet, positioned against `rect`.
pub fn standard_labels(cfg: &SheetConfig, rect: &PlacedRect) -> Vec<TextLabel> {
    let l = &cfg.labels;
    let top = i64::from(rect.y);
    let bottom = i64::from(rect.bottom());
    let (w_in, h_in) = (cfg.rect_width_in, cfg.rect_height_in);

    vec![
        TextLabel {
            kind: LabelKind::Title,
            text: "PRINTER CALIBRATION SHEET".to_string(),
            size_px: l.title_size_px,
            anchor: Anchor::CanvasCentered,
            y: l.title_y,
        },
        TextLabel {
            kind: LabelKind::Instruction,
            text: format!("Measure this rectangle outline: {w_in:.1} x {h_in:.1} inches"),
            size_px: l.title_size_px,
            anchor: Anchor::CanvasCentered,
            y: bottom + l.instruction_gap_px,
        },
        TextLabel {
            kind: LabelKind::WidthCaption,
            text: format!("{w_in:.1} inches"),
            size_px: l.caption_size_px,
            anchor: Anchor::RectCentered,
            y: top - l.width_caption_gap_px,
        },
        TextLabel {
            kind: LabelKind::HeightCaption,
            text: format!("{h_in:.1} inches"),
            size_px: l.caption_size_px,
            anchor: Anchor::LeftOfRect {
                offset_px: l.height_caption_offset_px,
            },
            y: top + i64::from(rect.height / 2),
        },
        TextLabel {
            kind: LabelKind::MeasurementTip,
            text: "Measure from outer edge to outer edge of the rectangle outline".to_string(),
            size_px: l.tip_size_px,
            anchor: Anchor::CanvasCentered,
            y: bottom + l.tip_gap_px,
        },
    ]
}

/// Left edge for a label of size `bounds` under `anchor`.
pub fn anchor_x(anchor: Anchor, bounds: TextBounds, canvas_w: u32, rect: &PlacedRect) -> i64 {
    let text_w = bounds.width_px();
    match anchor {
        Anchor::CanvasCentered => half_floor(i64::from(canvas_w) - text_w),
        Anchor::RectCentered => i64::from(rect.x) + half_floor(i64::from(rect.width) - text_w),
        Anchor::LeftOfRect { offset_px } => {
            let left = i64::from(rect.x);
            (left - offset_px).min(left - RECT_CLEARANCE_PX - text_w)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelFailure {
    pub kind: LabelKind,
    pub error: String,
}

/// Outcome of the label phase. Complete and degraded reports are both successes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelReport {
    pub total: usize,
    pub placed: Vec<LabelKind>,
    pub failures: Vec<LabelFailure>,
}

impl LabelReport {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.placed.len() == self.total
    }
}

impl std::fmt::Display for LabelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "placed {} of {} labels", self.placed.len(), self.total)
    }
}

/// Draw `labels` best-effort.
///
/// Each label is measured and drawn independently; a failure is logged and skipped, and a
/// skipped label leaves no pixels behind. A label whose measured box would reach the
/// rectangle's interior is skipped the same way.
#[tracing::instrument(skip_all, fields(labels = labels.len()))]
pub fn draw_labels(
    canvas: &mut Canvas,
    rect: &PlacedRect,
    labels: &[TextLabel],
    resolver: &mut FontResolver,
    painter: &mut dyn TextPainter,
) -> LabelReport {
    let mut report = LabelReport {
        total: labels.len(),
        ..LabelReport::default()
    };

    for label in labels {
        match draw_label(canvas, rect, label, resolver, painter) {
            Ok(()) => report.placed.push(label.kind),
            Err(err) => {
                tracing::warn!(label = %label.kind, error = %err, "could not add text label");
                report.failures.push(LabelFailure {
                    kind: label.kind,
                    error: err.to_string(),
                });
            }
        }
    }

    if !report.is_complete() {
        tracing::warn!("label phase degraded: {report}");
    }
    report
}

fn draw_label(
    canvas: &mut Canvas,
    rect: &PlacedRect,
    label: &TextLabel,
    resolver: &mut FontResolver,
    painter: &mut dyn TextPainter,
) -> CalsheetResult<()> {
    let font = resolver.resolve(label.size_px);
    let bounds = painter.measure(&label.text, &font)?;
    let x = anchor_x(label.anchor, bounds, canvas.width(), rect);

    let (x1, y1) = (x + bounds.width_px(), label.y + bounds.height_px());
    if rect.overlaps_interior(x, label.y, x1, y1) {
        return Err(CalsheetError::validation(format!(
            "{} at ({x}, {}) .. ({x1}, {y1}) would overlap the rectangle interior",
            label.kind, label.y
        )));
    }
    painter.draw(canvas, x, label.y, &label.text, &font)
}

#[cfg(test)]
#[path = "../tests/unit/labels.rs"]
mod tests;
