use std::sync::Arc;

use crate::{
    canvas::Canvas,
    foundation::{
        core::TextBounds,
        error::{CalsheetError, CalsheetResult},
    },
    text::font::{FontFace, OutlineFace, ResolvedFont},
};

/// Straight RGBA8 brush carried through Parley layouts.
pub type InkRgba8 = [u8; 4];

const INK: InkRgba8 = [0, 0, 0, 255];

/// Measures and draws single-line text onto a [`Canvas`].
///
/// Implementations must not leave partial output behind: when `draw` fails the canvas is
/// unchanged.
pub trait TextPainter {
    /// Bounding box `text` would occupy when drawn at the origin.
    fn measure(&mut self, text: &str, font: &ResolvedFont) -> CalsheetResult<TextBounds>;

    /// Draw `text` with its bounding box's top-left corner at `(x, y)`.
    fn draw(
        &mut self,
        canvas: &mut Canvas,
        x: i64,
        y: i64,
        text: &str,
        font: &ResolvedFont,
    ) -> CalsheetResult<()>;
}

/// Default painter: Parley shaping plus `vello_cpu` glyph rasterisation for outline faces,
/// direct stamping for the built-in face.
#[derive(Default)]
pub struct RasterTextPainter {
    engine: TextLayoutEngine,
}

impl RasterTextPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextPainter for RasterTextPainter {
    fn measure(&mut self, text: &str, font: &ResolvedFont) -> CalsheetResult<TextBounds> {
        match &font.face {
            FontFace::Builtin(b) => Ok(b.measure(text)),
            FontFace::Outline(face) => {
                let layout = self.engine.layout_plain(text, face, font.size_px)?;
                Ok(TextBounds::from_size(
                    f64::from(layout.width()),
                    f64::from(layout.height()),
                ))
            }
        }
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas,
        x: i64,
        y: i64,
        text: &str,
        font: &ResolvedFont,
    ) -> CalsheetResult<()> {
        match &font.face {
            FontFace::Builtin(b) => {
                b.draw(canvas, x, y, text);
                Ok(())
            }
            FontFace::Outline(face) => {
                let layout = self.engine.layout_plain(text, face, font.size_px)?;
                let font_data = self.engine.font_data(face)?;
                let coverage = rasterize_layout(&layout, &font_data)?;
                coverage.composite_onto(canvas, x, y);
                Ok(())
            }
        }
    }
}

/// Alpha coverage of one rasterised label.
struct Coverage {
    width: usize,
    alpha: Vec<u8>,
}

impl Coverage {
    fn composite_onto(&self, canvas: &mut Canvas, x: i64, y: i64) {
        if self.width == 0 {
            return;
        }
        for (i, &a) in self.alpha.iter().enumerate() {
            let dx = (i % self.width) as i64;
            let dy = (i / self.width) as i64;
            canvas.darken(x + dx, y + dy, a);
        }
    }
}

fn rasterize_layout(
    layout: &parley::Layout<InkRgba8>,
    font: &vello_cpu::peniko::FontData,
) -> CalsheetResult<Coverage> {
    let width = layout.width().ceil().max(0.0) as u32 + 1;
    let height = layout.height().ceil().max(0.0) as u32 + 1;
    let w: u16 = width
        .try_into()
        .map_err(|_| CalsheetError::text("label width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CalsheetError::text("label height exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let [r, g, b, a] = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

            // Layout-absolute pen position with the line's baseline as y.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let alpha = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    Ok(Coverage {
        width: usize::from(w),
        alpha,
    })
}

/// A face already registered with the shaping context.
struct RegisteredFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from loaded outline faces.
///
/// Each face is registered with the font collection once; later layouts reuse the family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<InkRgba8>,
    registered: Vec<RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    /// Number of distinct faces registered so far.
    pub fn registered_faces(&self) -> usize {
        self.registered.len()
    }

    fn register(&mut self, face: &OutlineFace) -> CalsheetResult<&RegisteredFace> {
        let pos = self
            .registered
            .iter()
            .position(|r| Arc::ptr_eq(&r.bytes, &face.bytes) && r.index == face.index);
        let pos = match pos {
            Some(pos) => pos,
            None => {
                let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = face.bytes.clone();
                let families = self
                    .font_ctx
                    .collection
                    .register_fonts(parley::fontique::Blob::new(shared.clone()), None);
                let family_id = families
                    .iter()
                    .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
                    .or_else(|| families.first())
                    .map(|(id, _)| *id)
                    .ok_or_else(|| {
                        CalsheetError::text("no font families registered from font bytes")
                    })?;
                let family_name = self
                    .font_ctx
                    .collection
                    .family_name(family_id)
                    .ok_or_else(|| CalsheetError::text("registered font family has no name"))?
                    .to_string();
                tracing::debug!(family = %family_name, "registered font face for shaping");

                self.registered.push(RegisteredFace {
                    bytes: face.bytes.clone(),
                    index: face.index,
                    family_name,
                    font_data: vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::new(shared),
                        face.index,
                    ),
                });
                self.registered.len() - 1
            }
        };
        Ok(&self.registered[pos])
    }

    /// Glyph source for rasterising layouts of `face`.
    pub fn font_data(
        &mut self,
        face: &OutlineFace,
    ) -> CalsheetResult<vello_cpu::peniko::FontData> {
        Ok(self.register(face)?.font_data.clone())
    }

    /// Shape `text` as a single unwrapped line in black ink.
    pub fn layout_plain(
        &mut self,
        text: &str,
        face: &OutlineFace,
        size_px: f32,
    ) -> CalsheetResult<parley::Layout<InkRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CalsheetError::text("text size_px must be finite and > 0"));
        }

        let family_name = self.register(face)?.family_name.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(INK));

        let mut layout: parley::Layout<InkRgba8> = builder.build(text);
        layout.break_all_lines(None);

        if layout.lines().next().is_none() && !text.is_empty() {
            return Err(CalsheetError::text("layout produced no lines"));
        }
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/painter.rs"]
mod tests;
