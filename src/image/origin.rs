//! Anchor point for layer placement.

/// How a coordinate anchors a layer onto the canvas: either a fixed offset
/// in canvas units, or a fraction of the layer's own dimension.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Origin {
    Absolute(f64),
    Relative(f64),
}

impl Default for Origin {
    fn default() -> Self {
        Self::Absolute(0.0)
    }
}

impl Origin {
    /// Resolves the anchor against a layer dimension.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Absolute(x) => *x,
            Self::Relative(a) => a * x,
        }
    }
}
