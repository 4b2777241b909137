//! Reference point of an image being placed.

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Origin {
    /// A fixed offset in pixels.
    Absolute(f64),
    /// A fraction of the image's size along the axis.
    Relative(f64),
}

impl Default for Origin {
    fn default() -> Self {
        Self::Absolute(0.0)
    }
}

impl Origin {
    /// Offset in pixels for an image of length `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Absolute(offset) => *offset,
            Self::Relative(a) => a * x,
        }
    }
}
