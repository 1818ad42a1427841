use super::*;

#[test]
fn scale_tracks_requested_size() {
    assert_eq!(BitmapFace::for_size(8.0).scale(), 1);
    assert_eq!(BitmapFace::for_size(24.0).scale(), 3);
    assert_eq!(BitmapFace::for_size(30.0).scale(), 4);
    assert_eq!(BitmapFace::for_size(40.0).scale(), 5);
    assert_eq!(BitmapFace::for_size(1.0).scale(), 1);
    assert_eq!(BitmapFace::for_size(f32::NAN).scale(), 1);
}

#[test]
fn measure_counts_advances_without_trailing_gap() {
    let face = BitmapFace::for_size(16.0);
    let b = face.measure("4.0 inches");
    assert_eq!(b.width_px(), (10 * 6 - 1) * 2);
    assert_eq!(b.height_px(), 14);
    assert_eq!(face.measure("").width_px(), 0);
}

#[test]
fn draw_stays_inside_measured_box() {
    let face = BitmapFace::for_size(16.0);
    let text = "Measure: 4.0 x 3.0";
    let b = face.measure(text);
    let (x0, y0) = (5i64, 7i64);

    let mut canvas = Canvas::new(300, 40);
    face.draw(&mut canvas, x0, y0, text);

    let mut inked = 0;
    for (x, y, p) in canvas.as_image().enumerate_pixels() {
        if p.0 == [255, 255, 255] {
            continue;
        }
        inked += 1;
        let (x, y) = (i64::from(x), i64::from(y));
        assert!(x >= x0 && x < x0 + b.width_px(), "x {x}");
        assert!(y >= y0 && y < y0 + b.height_px(), "y {y}");
    }
    assert!(inked > 0);
}

#[test]
fn glyph_lookup_covers_printable_ascii() {
    assert_eq!(glyph(' '), &[0u8; 7]);
    assert_ne!(glyph('A'), &[0u8; 7]);
    assert_ne!(glyph('~'), &[0u8; 7]);
    assert_eq!(glyph('é'), &REPLACEMENT);
    assert!(GLYPHS.iter().flatten().all(|row| *row < 32));
}

#[test]
fn draw_clips_at_canvas_edges() {
    let face = BitmapFace::for_size(8.0);
    let mut canvas = Canvas::new(4, 4);
    face.draw(&mut canvas, -3, -3, "MM");
    assert_eq!((canvas.width(), canvas.height()), (4, 4));
}
