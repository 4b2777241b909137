//! Puts a title and a cost line on a card template.

use crate::catalog::TechnologyRecord;
use crate::cost::aggregate;
use crate::error::Result;
use crate::geometry::{Region, COST};
use crate::layer::{Anchor, Bitmap, Canvas, LabelLayer, Layer, LayerStack};
use crate::layout::layout;
use crate::text::{fit, Fit, FontMetrics};

pub const TITLE_START_SIZE: u32 = 150;
pub const TITLE_STEP: u32 = 10;
/// Distance from the bottom edge of the title area to the title's center.
pub const TITLE_BASELINE_OFFSET: f64 = 100.0;
pub const COST_FONT_SIZE: u32 = 125;

pub struct CardComposer<'a, M: ?Sized, I> {
    metrics: &'a M,
    glyph: &'a I,
}

impl<'a, M: FontMetrics + ?Sized, I: Bitmap> CardComposer<'a, M, I> {
    pub fn new(metrics: &'a M, glyph: &'a I) -> Self {
        Self { metrics, glyph }
    }

    /// Decides everything drawn on a card, without touching any image.
    pub fn plan(
        &self,
        title: &str,
        upgraded: bool,
        tech: &TechnologyRecord,
    ) -> (Fit, LayerStack<'a, I>) {
        let region = Region::title(upgraded);
        let title_fit = fit(
            title,
            region.width() as f64,
            TITLE_START_SIZE,
            TITLE_STEP,
            self.metrics,
        );
        let mut layers = LayerStack::new();
        layers.push(Layer::Label(LabelLayer {
            text: title.to_string(),
            x: region.center_x(),
            y: region.bottom as f64 - TITLE_BASELINE_OFFSET,
            size: title_fit.size(),
            anchor: Anchor::Middle,
        }));

        let input = aggregate(&tech.input);
        let output = aggregate(&tech.output);
        let costs = layout(&input, &output, self.glyph, COST, COST_FONT_SIZE, self.metrics);
        layers.extend(costs.layers);
        (title_fit, layers)
    }

    /// Renders a finished card on a copy of `template`.
    pub fn compose<C: Canvas<Image = I>>(
        &self,
        canvas: &C,
        template: &I,
        title: &str,
        upgraded: bool,
        tech: &TechnologyRecord,
    ) -> Result<I> {
        let (_, layers) = self.plan(title, upgraded, tech);
        let card = canvas.copy(template)?;
        layers.render(card, canvas)
    }
}
