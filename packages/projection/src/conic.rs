//! Conic equal-area (Albers) projection.
//!
//! Points pass through three stages: a longitude rotation, the raw conic
//! equal-area formula (radians in, unit plane out), and a scale/translate
//! transform to screen space with the y axis pointing down.

use std::f64::consts::{PI, TAU};

const EPSILON: f64 = 1e-6;

/// Default scale of `d3.geoConicEqualArea`.
pub const DEFAULT_SCALE: f64 = 155.424;

/// Default translate of every d3 projection.
pub const DEFAULT_TRANSLATE: [f64; 2] = [480.0, 250.0];

/// Default center of `d3.geoConicEqualArea`, in degrees.
pub const DEFAULT_CENTER: [f64; 2] = [0.0, 33.6442];

/// Default standard parallels of d3 conic projections, in degrees.
pub const DEFAULT_PARALLELS: [f64; 2] = [0.0, 60.0];

/// Raw projection formula for a pair of standard parallels.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Raw {
    Conic { n: f64, c: f64, r0: f64 },
    /// Used when the parallels are symmetric about the equator, where the
    /// cone degenerates into a cylinder.
    Cylindrical { cos_phi0: f64 },
}

impl Raw {
    fn new(phi0: f64, phi1: f64) -> Self {
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        if n.abs() < EPSILON {
            return Self::Cylindrical {
                cos_phi0: phi0.cos(),
            };
        }
        let c = sy0.mul_add(-sy0, 1.0 + sy0 * 2.0 * n);
        Self::Conic {
            n,
            c,
            r0: c.sqrt() / n,
        }
    }

    fn forward(self, lambda: f64, phi: f64) -> (f64, f64) {
        match self {
            Self::Conic { n, c, r0 } => {
                let r = (2.0 * n).mul_add(-phi.sin(), c).sqrt() / n;
                let theta = lambda * n;
                (r * theta.sin(), r.mul_add(-theta.cos(), r0))
            }
            Self::Cylindrical { cos_phi0 } => (lambda * cos_phi0, phi.sin() / cos_phi0),
        }
    }

    fn invert(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Conic { n, c, r0 } => {
                let r0y = r0 - y;
                let mut l = x.atan2(r0y.abs()) * r0y.signum();
                if r0y * n < 0.0 {
                    l -= PI * x.signum() * r0y.signum();
                }
                let phi = (x.mul_add(x, r0y * r0y) * n).mul_add(-n, c) / (2.0 * n);
                (l / n, phi.clamp(-1.0, 1.0).asin())
            }
            Self::Cylindrical { cos_phi0 } => {
                (x / cos_phi0, (y * cos_phi0).clamp(-1.0, 1.0).asin())
            }
        }
    }
}

/// Wraps a longitude in radians into `[-PI, PI]`.
fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - TAU
    } else if lambda < -PI {
        lambda + TAU
    } else {
        lambda
    }
}

/// A configurable conic equal-area projection.
///
/// Longitude/latitude inputs are in degrees; outputs are screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicEqualArea {
    parallels: [f64; 2],
    rotate: f64,
    center: [f64; 2],
    scale: f64,
    translate: [f64; 2],
    raw: Raw,
    /// Projected center, in the raw unit plane.
    center_raw: (f64, f64),
}

impl Default for ConicEqualArea {
    fn default() -> Self {
        Self::new()
    }
}

impl ConicEqualArea {
    /// Creates a projection with d3's defaults.
    #[must_use]
    pub fn new() -> Self {
        let mut projection = Self {
            parallels: DEFAULT_PARALLELS,
            rotate: 0.0,
            center: DEFAULT_CENTER,
            scale: DEFAULT_SCALE,
            translate: DEFAULT_TRANSLATE,
            raw: Raw::new(0.0, DEFAULT_PARALLELS[1].to_radians()),
            center_raw: (0.0, 0.0),
        };
        projection.recenter();
        projection
    }

    /// Sets the two standard parallels, in degrees.
    #[must_use]
    pub fn with_parallels(mut self, parallels: [f64; 2]) -> Self {
        self.parallels = parallels;
        self.raw = Raw::new(parallels[0].to_radians(), parallels[1].to_radians());
        self.recenter();
        self
    }

    /// Sets the longitude rotation, in degrees. Only the lambda component
    /// of a d3 rotation is supported.
    #[must_use]
    pub fn with_rotate(mut self, lambda: f64) -> Self {
        self.rotate = lambda;
        self
    }

    /// Sets the projection center, in degrees.
    #[must_use]
    pub fn with_center(mut self, center: [f64; 2]) -> Self {
        self.center = center;
        self.recenter();
        self
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub const fn with_translate(mut self, translate: [f64; 2]) -> Self {
        self.translate = translate;
        self
    }

    pub const fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub const fn set_translate(&mut self, translate: [f64; 2]) {
        self.translate = translate;
    }

    #[must_use]
    pub const fn parallels(&self) -> [f64; 2] {
        self.parallels
    }

    #[must_use]
    pub const fn rotate(&self) -> f64 {
        self.rotate
    }

    #[must_use]
    pub const fn center(&self) -> [f64; 2] {
        self.center
    }

    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub const fn translate(&self) -> [f64; 2] {
        self.translate
    }

    fn recenter(&mut self) {
        self.center_raw = self
            .raw
            .forward(self.center[0].to_radians(), self.center[1].to_radians());
    }

    /// Projects a longitude/latitude pair to screen coordinates.
    ///
    /// Returns `None` if either input or the projected result is not
    /// finite.
    #[must_use]
    pub fn project(&self, longitude: f64, latitude: f64) -> Option<(f64, f64)> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }
        let lambda = wrap_longitude((longitude + self.rotate).to_radians());
        let (x, y) = self.raw.forward(lambda, latitude.to_radians());
        let sx = self.scale.mul_add(x - self.center_raw.0, self.translate[0]);
        let sy = self.scale.mul_add(-(y - self.center_raw.1), self.translate[1]);
        (sx.is_finite() && sy.is_finite()).then_some((sx, sy))
    }

    /// Inverts screen coordinates back to longitude/latitude in degrees.
    #[must_use]
    pub fn invert(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() || self.scale.abs() < f64::EPSILON {
            return None;
        }
        let rx = (x - self.translate[0]) / self.scale + self.center_raw.0;
        let ry = (self.translate[1] - y) / self.scale + self.center_raw.1;
        let (lambda, phi) = self.raw.invert(rx, ry);
        let longitude = wrap_longitude(lambda - self.rotate.to_radians()).to_degrees();
        let latitude = phi.to_degrees();
        (longitude.is_finite() && latitude.is_finite()).then_some((longitude, latitude))
    }
}
