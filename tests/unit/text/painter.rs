use super::*;
use crate::text::font::{FontResolver, FontSource};

#[test]
fn builtin_measure_matches_bitmap_face() {
    let mut painter = RasterTextPainter::new();
    let font = ResolvedFont::builtin(24.0);
    let FontFace::Builtin(face) = &font.face else {
        unreachable!("builtin font must carry a bitmap face");
    };

    let b = painter.measure("3.0 inches", &font).unwrap();
    assert_eq!(b, face.measure("3.0 inches"));
}

#[test]
fn builtin_draw_inks_canvas() {
    let mut painter = RasterTextPainter::new();
    let font = ResolvedFont::builtin(16.0);
    let mut canvas = Canvas::new(200, 40);

    painter.draw(&mut canvas, 2, 2, "CAL", &font).unwrap();
    assert!(canvas.as_image().pixels().any(|p| p.0 == [0, 0, 0]));
}

#[test]
fn layout_rejects_bad_size() {
    let face = OutlineFace {
        bytes: std::sync::Arc::new(Vec::new()),
        index: 0,
        family: "none".to_string(),
    };
    let mut engine = TextLayoutEngine::new();
    assert!(engine.layout_plain("x", &face, 0.0).is_err());
    assert!(engine.layout_plain("x", &face, f32::NAN).is_err());
}

#[test]
fn empty_font_bytes_do_not_register() {
    let face = OutlineFace {
        bytes: std::sync::Arc::new(Vec::new()),
        index: 0,
        family: "none".to_string(),
    };
    let mut engine = TextLayoutEngine::new();
    let err = engine.layout_plain("x", &face, 12.0).err().unwrap();
    assert!(err.to_string().contains("no font families"), "{err}");
    assert_eq!(engine.registered_faces(), 0);
}

fn fixture_font(size_px: f32) -> ResolvedFont {
    let mut resolver = FontResolver::new(vec![FontSource::File {
        path: "tests/data/fonts/Tuffy.ttf".into(),
    }]);
    let font = resolver.resolve(size_px);
    assert!(!font.is_builtin(), "fixture font must load");
    font
}

#[test]
fn outline_text_inks_its_measured_box() {
    let font = fixture_font(40.0);
    let mut painter = RasterTextPainter::new();
    let text = "PRINTER CALIBRATION SHEET";

    let b = painter.measure(text, &font).unwrap();
    let (w, h) = (b.width_px(), b.height_px());
    assert!(w > 300 && h > 20, "{w} x {h}");

    let (x0, y0) = (20i64, 15i64);
    let mut canvas = Canvas::new(w as u32 + 60, h as u32 + 40);
    painter.draw(&mut canvas, x0, y0, text, &font).unwrap();

    let mut ink = 0i64;
    for (x, y, p) in canvas.as_image().enumerate_pixels() {
        if p.0 == [255, 255, 255] {
            continue;
        }
        let (x, y) = (i64::from(x), i64::from(y));
        assert!(x >= x0 && x <= x0 + w, "x {x} outside {x0}..={}", x0 + w);
        assert!(y >= y0 && y <= y0 + h, "y {y} outside {y0}..={}", y0 + h);
        if p.0[0] < 128 {
            ink += 1;
        }
    }
    // Glyph strokes cover a real share of the box, not a few stray pixels.
    assert!(ink * 20 >= w * h, "only {ink} ink pixels in {w} x {h}");
}

#[test]
fn glyphs_advance_along_the_line() {
    let font = fixture_font(30.0);
    let mut painter = RasterTextPainter::new();
    let b = painter.measure("IIII IIII", &font).unwrap();

    let mut canvas = Canvas::new(b.width_px() as u32 + 2, b.height_px() as u32 + 2);
    painter.draw(&mut canvas, 0, 0, "IIII IIII", &font).unwrap();

    let inked_columns = (0..canvas.width())
        .filter(|&x| (0..canvas.height()).any(|y| canvas.pixel(x, y).is_some_and(|p| p[0] < 128)))
        .count();
    // Eight separate stems.
    assert!(inked_columns >= 8, "{inked_columns} inked columns");
    let first = (0..canvas.width())
        .find(|&x| (0..canvas.height()).any(|y| canvas.pixel(x, y).is_some_and(|p| p[0] < 128)))
        .unwrap();
    let last = (0..canvas.width())
        .rev()
        .find(|&x| (0..canvas.height()).any(|y| canvas.pixel(x, y).is_some_and(|p| p[0] < 128)))
        .unwrap();
    assert!(last - first > canvas.width() / 2, "ink spans {first}..{last}");
}

#[test]
fn each_face_registers_once() {
    let font = fixture_font(24.0);
    let mut painter = RasterTextPainter::new();
    let mut canvas = Canvas::new(400, 60);

    for text in ["3.0 inches", "4.0 inches", "Measure"] {
        painter.measure(text, &font).unwrap();
        painter.draw(&mut canvas, 5, 5, text, &font).unwrap();
    }
    assert_eq!(painter.engine.registered_faces(), 1);
}
