use crate::{
    canvas::Canvas,
    config::SheetConfig,
    foundation::error::CalsheetResult,
    labels::{LabelReport, draw_labels, standard_labels},
    output::{SheetSummary, write_png},
    rectangle::{PlacedRect, draw_stroked, place_centered},
    text::{
        font::FontResolver,
        painter::{RasterTextPainter, TextPainter},
    },
};

/// A fully drawn sheet that has not been written yet.
#[derive(Clone, Debug)]
pub struct RenderedSheet {
    pub canvas: Canvas,
    pub rect: PlacedRect,
    pub labels: LabelReport,
}

/// Build the canvas, draw the rectangle, then add labels best-effort. No IO besides font
/// loading.
#[tracing::instrument(skip_all, fields(width = cfg.canvas.width, height = cfg.canvas.height))]
pub fn render_sheet(
    cfg: &SheetConfig,
    resolver: &mut FontResolver,
    painter: &mut dyn TextPainter,
) -> CalsheetResult<RenderedSheet> {
    cfg.validate()?;

    let mut canvas = Canvas::new(cfg.canvas.width, cfg.canvas.height);

    let (rect_w, rect_h) = cfg.rect_size_px();
    let rect = place_centered(
        canvas.width(),
        canvas.height(),
        rect_w,
        rect_h,
        cfg.stroke_px,
    )?;
    draw_stroked(&mut canvas, &rect);
    tracing::debug!(x = rect.x, y = rect.y, rect_w, rect_h, "rectangle placed");

    let labels = if cfg.labels.enabled {
        let labels = standard_labels(cfg, &rect);
        draw_labels(&mut canvas, &rect, &labels, resolver, painter)
    } else {
        LabelReport::default()
    };
    tracing::info!(placed = labels.placed_count(), total = labels.total, "label phase finished");

    Ok(RenderedSheet {
        canvas,
        rect,
        labels,
    })
}

/// Render the sheet described by `cfg` and write it to `cfg.output_path`.
pub fn generate(cfg: &SheetConfig) -> CalsheetResult<SheetSummary> {
    let mut painter = RasterTextPainter::new();
    generate_with(cfg, &mut painter)
}

/// [`generate`] with a caller-supplied text painter.
pub fn generate_with(
    cfg: &SheetConfig,
    painter: &mut dyn TextPainter,
) -> CalsheetResult<SheetSummary> {
    let mut resolver = FontResolver::new(cfg.fonts.clone());
    let sheet = render_sheet(cfg, &mut resolver, painter)?;
    write_png(&sheet.canvas, &cfg.output_path)?;
    Ok(summarize(cfg, &sheet))
}

fn summarize(cfg: &SheetConfig, sheet: &RenderedSheet) -> SheetSummary {
    SheetSummary {
        output_path: cfg.output_path.clone(),
        width: sheet.canvas.width(),
        height: sheet.canvas.height(),
        rect_width_px: sheet.rect.width,
        rect_height_px: sheet.rect.height,
        rect_width_in: cfg.rect_width_in,
        rect_height_in: cfg.rect_height_in,
        dpi: cfg.dpi,
        stroke_px: sheet.rect.stroke_px,
        labels_placed: sheet.labels.placed_count(),
        labels_total: sheet.labels.total,
    }
}
