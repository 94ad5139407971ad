//! Pan/zoom transform applied to the whole map.

/// Allowed zoom range.
pub const SCALE_EXTENT: [f64; 2] = [1.0, 8.0];

/// An affine zoom transform: `screen = local * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Zooms by `factor` about the screen point `(px, py)`, clamping the
    /// resulting scale to [`SCALE_EXTENT`].
    #[must_use]
    pub fn scale_by(self, factor: f64, px: f64, py: f64) -> Self {
        let k = (self.k * factor).clamp(SCALE_EXTENT[0], SCALE_EXTENT[1]);
        let (lx, ly) = self.invert(px, py);
        Self {
            k,
            x: lx.mul_add(-k, px),
            y: ly.mul_add(-k, py),
        }
    }

    /// Pans by `(dx, dy)` screen pixels.
    #[must_use]
    pub fn translate_by(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Local map coordinates to screen coordinates.
    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (x.mul_add(self.k, self.x), y.mul_add(self.k, self.y))
    }

    /// Screen coordinates to local map coordinates.
    #[must_use]
    pub fn invert(self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x) / self.k, (y - self.y) / self.k)
    }

    /// SVG `transform` attribute value.
    #[must_use]
    pub fn to_svg(self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}
