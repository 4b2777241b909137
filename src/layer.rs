//! Draw commands and the canvas that executes them.

use crate::error::Result;

use std::fmt;

/// Anything with pixel dimensions.
pub trait Bitmap {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

/// A drawing surface backend. Drawing consumes an image and returns the
/// drawn one, so a shared template is only ever read.
pub trait Canvas {
    type Image: Bitmap;

    /// Makes an independent copy of `img`.
    fn copy(&self, img: &Self::Image) -> Result<Self::Image>;

    fn print(&self, img: Self::Image, label: &LabelLayer) -> Result<Self::Image>;

    /// Draws `src` with its top left corner at `(x, y)`.
    fn blit(&self, img: Self::Image, src: &Self::Image, x: i32, y: i32) -> Result<Self::Image>;
}

/// Which point of a text's box is placed at a label's position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Left edge, on the baseline.
    LeftBaseline,
    /// Center of the text box.
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayer {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: u32,
    pub anchor: Anchor,
}

pub struct GlyphLayer<'g, I> {
    pub image: &'g I,
    pub x: f64,
    pub y: f64,
}

impl<I: Bitmap> fmt::Debug for GlyphLayer<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphLayer")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

#[derive(Debug)]
pub enum Layer<'g, I: Bitmap> {
    Label(LabelLayer),
    Glyph(GlyphLayer<'g, I>),
}

impl<'g, I: Bitmap> Layer<'g, I> {
    pub fn render<C: Canvas<Image = I>>(&self, img: I, canvas: &C) -> Result<I> {
        match self {
            Layer::Label(label) => canvas.print(img, label),
            Layer::Glyph(glyph) => {
                canvas.blit(img, glyph.image, glyph.x.round() as i32, glyph.y.round() as i32)
            }
        }
    }
}

#[derive(Debug)]
pub struct LayerStack<'g, I: Bitmap>(pub Vec<Layer<'g, I>>);

impl<'g, I: Bitmap> LayerStack<'g, I> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, layer: Layer<'g, I>) {
        self.0.push(layer);
    }

    pub fn extend(&mut self, other: LayerStack<'g, I>) {
        self.0.extend(other.0);
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelLayer> {
        self.0.iter().filter_map(|layer| match layer {
            Layer::Label(label) => Some(label),
            Layer::Glyph(_) => None,
        })
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphLayer<'g, I>> {
        self.0.iter().filter_map(|layer| match layer {
            Layer::Glyph(glyph) => Some(glyph),
            Layer::Label(_) => None,
        })
    }

    /// Draws every layer in order on top of `base`.
    pub fn render<C: Canvas<Image = I>>(self, base: I, canvas: &C) -> Result<I> {
        let LayerStack(layers) = self;
        let mut img = base;
        for layer in layers.iter() {
            img = layer.render(img, canvas)?;
        }
        Ok(img)
    }
}

impl<'g, I: Bitmap> Default for LayerStack<'g, I> {
    fn default() -> Self {
        Self::new()
    }
}
