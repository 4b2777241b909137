//! Centered `input -> output` cost line.

use crate::geometry::Region;
use crate::layer::{Anchor, Bitmap, GlyphLayer, LabelLayer, Layer, LayerStack};
use crate::text::FontMetrics;

/// Space on each side of the glyph.
pub const GLYPH_GAP: f64 = 25.0;

#[derive(Debug)]
pub struct CostLayout<'g, I: Bitmap> {
    /// Horizontal position of the leftmost element.
    pub left: f64,
    /// Width of both costs, the glyph and the gaps around it.
    pub total_width: f64,
    pub layers: LayerStack<'g, I>,
}

/// Places `input`, `glyph` and `output` left to right, centered in
/// `region` and sitting on its bottom edge.
pub fn layout<'g, I: Bitmap, M: FontMetrics + ?Sized>(
    input: &str,
    output: &str,
    glyph: &'g I,
    region: Region,
    size: u32,
    metrics: &M,
) -> CostLayout<'g, I> {
    let input_width = metrics.text_width(input, size);
    let output_width = metrics.text_width(output, size);
    let glyph_width = glyph.width() as f64;
    let total_width = input_width + glyph_width + output_width + 2.0 * GLYPH_GAP;
    let left = region.center_x() - total_width / 2.0;
    let baseline = region.bottom as f64;

    let label = |text: &str, x: f64| {
        Layer::Label(LabelLayer {
            text: text.to_string(),
            x,
            y: baseline,
            size,
            anchor: Anchor::LeftBaseline,
        })
    };
    let glyph_x = left + input_width + GLYPH_GAP;
    let layers = LayerStack(vec![
        label(input, left),
        Layer::Glyph(GlyphLayer {
            image: glyph,
            x: glyph_x,
            y: baseline - glyph.height() as f64,
        }),
        label(output, glyph_x + glyph_width + GLYPH_GAP),
    ]);
    CostLayout { left, total_width, layers }
}
