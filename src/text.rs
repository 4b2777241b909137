//! Text measurement and font size fitting.

mod font;

pub use font::Font;

/// Smallest size the fitter will shrink text to.
pub const MIN_FONT_SIZE: u32 = 10;

/// Anything that can tell how wide a string renders at a given pixel size.
pub trait FontMetrics {
    fn text_width(&self, text: &str, size: u32) -> f64;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn text_width(&self, text: &str, size: u32) -> f64 {
        (**self).text_width(text, size)
    }
}

/// Outcome of [`fit`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fit {
    /// The text fits at this size.
    Fits(u32),
    /// The text still overflows at this size, which is the smallest one
    /// the fitter was allowed to try.
    Overflow(u32),
}

impl Fit {
    pub fn size(&self) -> u32 {
        match *self {
            Fit::Fits(size) | Fit::Overflow(size) => size,
        }
    }

    pub fn overflows(&self) -> bool {
        matches!(self, Fit::Overflow(_))
    }
}

/// Finds the largest size, starting at `start` and going down by `step`,
/// at which `text` is no wider than `max_width`. Never goes below
/// [`MIN_FONT_SIZE`]; a start below the floor is raised to it.
pub fn fit<M: FontMetrics + ?Sized>(
    text: &str,
    max_width: f64,
    start: u32,
    step: u32,
    metrics: &M,
) -> Fit {
    let mut size = start.max(MIN_FONT_SIZE);
    while metrics.text_width(text, size) > max_width {
        if size == MIN_FONT_SIZE || step == 0 {
            log::warn!("`{text}` does not fit in {max_width}px even at size {size}");
            return Fit::Overflow(size);
        }
        log::info!("overlong text `{text}` at size {size}, shrinking");
        size = size.saturating_sub(step).max(MIN_FONT_SIZE);
    }
    Fit::Fits(size)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every character advances by half the font size.
    pub struct HalfEm;

    impl FontMetrics for HalfEm {
        fn text_width(&self, text: &str, size: u32) -> f64 {
            text.chars().count() as f64 * size as f64 / 2.0
        }
    }

    #[test]
    fn keeps_start_size_when_text_fits() {
        assert_eq!(fit("Nanotechnology", 1800.0, 150, 10, &HalfEm), Fit::Fits(150));
    }

    #[test]
    fn shrinks_by_step_until_it_fits() {
        // 30 chars: 150 -> 2250px, 120 -> 1800px
        let title = "a".repeat(30);
        assert_eq!(fit(&title, 1800.0, 150, 10, &HalfEm), Fit::Fits(120));
    }

    #[test]
    fn stops_at_the_floor() {
        let result = fit("never fits", 0.0, 150, 10, &HalfEm);
        assert_eq!(result, Fit::Overflow(MIN_FONT_SIZE));
        assert!(result.overflows());
    }

    #[test]
    fn floor_is_reached_even_with_uneven_steps() {
        assert_eq!(fit("x", -1.0, 37, 10, &HalfEm), Fit::Overflow(MIN_FONT_SIZE));
    }

    #[test]
    fn never_returns_below_the_floor() {
        for start in [0, 5, 10, 11, 150] {
            for step in [0, 1, 7, 10, 200] {
                let result = fit("some title", 12.0, start, step, &HalfEm);
                assert!(result.size() >= MIN_FONT_SIZE, "{start} {step} {result:?}");
            }
        }
    }

    #[test]
    fn zero_step_does_not_loop() {
        assert_eq!(fit("wide", 1.0, 40, 0, &HalfEm), Fit::Overflow(40));
    }

    #[test]
    fn empty_text_always_fits() {
        assert_eq!(fit("", 0.0, 150, 10, &HalfEm), Fit::Fits(150));
    }
}
