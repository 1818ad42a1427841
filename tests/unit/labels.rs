use super::*;
use crate::{
    foundation::{core::WHITE, error::CalsheetError},
    rectangle::{draw_stroked, place_centered},
    text::font::ResolvedFont,
};

fn reference_rect() -> PlacedRect {
    place_centered(3300, 2550, 600, 450, 3).unwrap()
}

fn assert_no_interior_ink(canvas: &Canvas, rect: &PlacedRect) {
    for y in rect.y..=rect.bottom() {
        for x in rect.x..=rect.right() {
            if rect.is_interior(x, y) {
                assert_eq!(canvas.pixel(x, y), Some(WHITE), "interior ({x}, {y})");
            }
        }
    }
}

/// Measures every string as a fixed-size box and records draw positions.
struct FixedPainter {
    width: f64,
    drawn: Vec<(String, i64, i64)>,
}

impl TextPainter for FixedPainter {
    fn measure(&mut self, _text: &str, _font: &ResolvedFont) -> CalsheetResult<TextBounds> {
        Ok(TextBounds::from_size(self.width, 10.0))
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas,
        x: i64,
        y: i64,
        text: &str,
        _font: &ResolvedFont,
    ) -> CalsheetResult<()> {
        canvas.darken(x, y, u8::MAX);
        self.drawn.push((text.to_string(), x, y));
        Ok(())
    }
}

/// Fails every label whose text contains `needle`.
struct FailingPainter {
    needle: &'static str,
}

impl TextPainter for FailingPainter {
    fn measure(&mut self, text: &str, _font: &ResolvedFont) -> CalsheetResult<TextBounds> {
        if text.contains(self.needle) {
            return Err(CalsheetError::text("simulated shaping failure"));
        }
        Ok(TextBounds::from_size(20.0, 10.0))
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas,
        x: i64,
        y: i64,
        _text: &str,
        _font: &ResolvedFont,
    ) -> CalsheetResult<()> {
        canvas.darken(x, y, u8::MAX);
        Ok(())
    }
}

#[test]
fn standard_labels_match_reference_layout() {
    let cfg = SheetConfig::default();
    let labels = standard_labels(&cfg, &reference_rect());

    let got: Vec<(LabelKind, &str, f32, i64)> = labels
        .iter()
        .map(|l| (l.kind, l.text.as_str(), l.size_px, l.y))
        .collect();
    assert_eq!(
        got,
        vec![
            (LabelKind::Title, "PRINTER CALIBRATION SHEET", 40.0, 100),
            (
                LabelKind::Instruction,
                "Measure this rectangle outline: 4.0 x 3.0 inches",
                40.0,
                1550
            ),
            (LabelKind::WidthCaption, "4.0 inches", 30.0, 1010),
            (LabelKind::HeightCaption, "3.0 inches", 30.0, 1275),
            (
                LabelKind::MeasurementTip,
                "Measure from outer edge to outer edge of the rectangle outline",
                24.0,
                1600
            ),
        ]
    );
}

#[test]
fn anchors_center_and_offset() {
    let rect = reference_rect();
    let b = TextBounds::from_size(501.0, 40.0);

    assert_eq!(anchor_x(Anchor::CanvasCentered, b, 3300, &rect), 1399);
    assert_eq!(anchor_x(Anchor::RectCentered, b, 3300, &rect), 1350 + 49);
    let narrow = TextBounds::from_size(90.0, 30.0);
    assert_eq!(
        anchor_x(Anchor::LeftOfRect { offset_px: 120 }, narrow, 3300, &rect),
        1230
    );
    // Too wide for the offset: right-aligned against the clearance gap instead.
    assert_eq!(
        anchor_x(Anchor::LeftOfRect { offset_px: 120 }, b, 3300, &rect),
        1350 - RECT_CLEARANCE_PX - 501
    );

    // Wider than the canvas: the label starts left of the edge.
    let wide = TextBounds::from_size(3401.0, 40.0);
    assert_eq!(anchor_x(Anchor::CanvasCentered, wide, 3300, &rect), -51);
}

#[test]
fn fractional_widths_round_up_before_centering() {
    let rect = reference_rect();
    let b = TextBounds::from_size(100.2, 10.0);
    assert_eq!(b.width_px(), 101);
    assert_eq!(anchor_x(Anchor::CanvasCentered, b, 3300, &rect), 1599);
}

#[test]
fn all_labels_placed_with_working_painter() {
    let cfg = SheetConfig::default();
    let rect = reference_rect();
    let labels = standard_labels(&cfg, &rect);
    let mut canvas = Canvas::new(3300, 2550);
    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = FixedPainter {
        width: 100.0,
        drawn: Vec::new(),
    };

    let report = draw_labels(&mut canvas, &rect, &labels, &mut resolver, &mut painter);
    assert!(report.is_complete());
    assert_eq!(report.to_string(), "placed 5 of 5 labels");

    let positions: Vec<(i64, i64)> = painter.drawn.iter().map(|(_, x, y)| (*x, *y)).collect();
    assert_eq!(
        positions,
        vec![(1600, 100), (1600, 1550), (1600, 1010), (1230, 1275), (1600, 1600)]
    );
}

#[test]
fn one_failing_label_is_skipped() {
    let cfg = SheetConfig::default();
    let rect = reference_rect();
    let labels = standard_labels(&cfg, &rect);
    let mut canvas = Canvas::new(3300, 2550);
    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = FailingPainter { needle: "CALIBRATION" };

    let report = draw_labels(&mut canvas, &rect, &labels, &mut resolver, &mut painter);
    assert_eq!(report.placed_count(), 4);
    assert_eq!(report.total, 5);
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, LabelKind::Title);
    assert!(report.failures[0].error.contains("simulated shaping failure"));
    assert!(!report.placed.contains(&LabelKind::Title));
}

#[test]
fn failing_labels_leave_rectangle_untouched() {
    let cfg = SheetConfig::default();
    let rect = reference_rect();
    let labels = standard_labels(&cfg, &rect);
    let mut canvas = Canvas::new(3300, 2550);
    draw_stroked(&mut canvas, &rect);
    let before = canvas.clone();

    let mut resolver = FontResolver::new(Vec::new());
    // Every label text contains a space.
    let mut painter = FailingPainter { needle: " " };
    let report = draw_labels(&mut canvas, &rect, &labels, &mut resolver, &mut painter);

    assert_eq!(report.placed_count(), 0);
    assert_eq!(report.failures.len(), 5);
    assert_eq!(report.to_string(), "placed 0 of 5 labels");
    assert_eq!(canvas, before);
}

#[test]
fn builtin_face_places_every_label() {
    let cfg = SheetConfig::default();
    let rect = reference_rect();
    let labels = standard_labels(&cfg, &rect);
    let mut canvas = Canvas::new(3300, 2550);
    draw_stroked(&mut canvas, &rect);

    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = crate::text::painter::RasterTextPainter::new();
    let report = draw_labels(&mut canvas, &rect, &labels, &mut resolver, &mut painter);

    assert!(report.is_complete());
    assert_no_interior_ink(&canvas, &rect);
    // Title ink lands in the title band.
    let title_inked = (100..140).any(|y| (0..3300).any(|x| canvas.pixel(x, y) != Some(WHITE)));
    assert!(title_inked);
    // Rectangle center stays paper.
    assert_eq!(canvas.pixel(1650, 1275), Some(WHITE));
}

#[test]
fn empty_label_list_reports_nothing() {
    let rect = reference_rect();
    let mut canvas = Canvas::new(3300, 2550);
    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = FailingPainter { needle: "" };
    let report = draw_labels(&mut canvas, &rect, &[], &mut resolver, &mut painter);
    assert_eq!(report, LabelReport::default());
    assert!(report.is_complete());
}

#[test]
fn builtin_height_caption_stays_left_of_rectangle() {
    let cfg = SheetConfig::default();
    let rect = reference_rect();
    let caption: Vec<TextLabel> = standard_labels(&cfg, &rect)
        .into_iter()
        .filter(|l| l.kind == LabelKind::HeightCaption)
        .collect();
    let mut canvas = Canvas::new(3300, 2550);
    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = crate::text::painter::RasterTextPainter::new();

    let report = draw_labels(&mut canvas, &rect, &caption, &mut resolver, &mut painter);
    assert!(report.is_complete());

    let rightmost_ink = (0..rect.x)
        .filter(|&x| (1275..1320).any(|y| canvas.pixel(x, y) != Some(WHITE)))
        .max()
        .unwrap();
    assert!(i64::from(rightmost_ink) < i64::from(rect.x) - RECT_CLEARANCE_PX + 1);
}

#[test]
fn label_reaching_interior_is_skipped() {
    let rect = reference_rect();
    let labels = vec![TextLabel {
        kind: LabelKind::Title,
        text: "inside".to_string(),
        size_px: 40.0,
        anchor: Anchor::RectCentered,
        y: 1200,
    }];
    let mut canvas = Canvas::new(3300, 2550);
    draw_stroked(&mut canvas, &rect);
    let before = canvas.clone();

    let mut resolver = FontResolver::new(Vec::new());
    let mut painter = FixedPainter {
        width: 100.0,
        drawn: Vec::new(),
    };
    let report = draw_labels(&mut canvas, &rect, &labels, &mut resolver, &mut painter);

    assert_eq!(report.placed_count(), 0);
    assert!(report.failures[0].error.contains("rectangle interior"));
    assert!(painter.drawn.is_empty());
    assert_eq!(canvas, before);
}
