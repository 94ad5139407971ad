//! Fitting a projection to a geometry.
//!
//! Mirrors `projection.fitExtent` / `projection.fitSize`: the projection is
//! reset to scale 150 and translate `[0, 0]`, the geometry's projected
//! bounds are measured, and scale and translate are then chosen so the
//! bounds are centred inside the requested extent.

use geo::{Coord, CoordsIter};

use crate::{ConicEqualArea, ProjectionError};

const FIT_SCALE: f64 = 150.0;

/// Screen-space bounding box as `[[x0, y0], [x1, y1]]`.
pub type Bounds = [[f64; 2]; 2];

impl ConicEqualArea {
    /// Fits the projection so `geometry` fills a `width`×`height` viewport
    /// anchored at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if the geometry has no projectable
    /// coordinates or its projected bounds are degenerate.
    pub fn fit_size<G>(&mut self, size: [f64; 2], geometry: &G) -> Result<(), ProjectionError>
    where
        G: CoordsIter<Scalar = f64>,
    {
        self.fit_extent([[0.0, 0.0], size], geometry)
    }

    /// Fits the projection so `geometry` fills `extent`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if the geometry has no projectable
    /// coordinates, or either the extent or the projected bounds are
    /// degenerate.
    pub fn fit_extent<G>(&mut self, extent: Bounds, geometry: &G) -> Result<(), ProjectionError>
    where
        G: CoordsIter<Scalar = f64>,
    {
        self.fit_extent_coords(extent, geometry.coords_iter())
    }

    /// Fits the projection to an arbitrary stream of coordinates.
    ///
    /// # Errors
    ///
    /// See [`Self::fit_extent`].
    pub fn fit_extent_coords<I>(&mut self, extent: Bounds, coords: I) -> Result<(), ProjectionError>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let w = extent[1][0] - extent[0][0];
        let h = extent[1][1] - extent[0][1];
        if !(w > 0.0 && h > 0.0) {
            return Err(ProjectionError::DegenerateExtent {
                message: format!("target extent is {w}x{h}"),
            });
        }

        self.set_scale(FIT_SCALE);
        self.set_translate([0.0, 0.0]);

        let b = self
            .projected_bounds(coords)
            .ok_or(ProjectionError::EmptyGeometry)?;
        let bw = b[1][0] - b[0][0];
        let bh = b[1][1] - b[0][1];

        let k = match (bw > 0.0, bh > 0.0) {
            (true, true) => (w / bw).min(h / bh),
            (true, false) => w / bw,
            (false, true) => h / bh,
            (false, false) => {
                return Err(ProjectionError::DegenerateExtent {
                    message: "geometry projects to a single point".to_string(),
                });
            }
        };
        let x = k.mul_add(-(b[1][0] + b[0][0]), w) / 2.0 + extent[0][0];
        let y = k.mul_add(-(b[1][1] + b[0][1]), h) / 2.0 + extent[0][1];

        self.set_scale(FIT_SCALE * k);
        self.set_translate([x, y]);

        log::debug!(
            "Fitted projection: scale={:.3} translate=[{x:.3}, {y:.3}]",
            self.scale()
        );

        Ok(())
    }

    /// Projected bounds of every finite vertex, or `None` if no vertex
    /// projects.
    #[must_use]
    pub fn projected_bounds<I>(&self, coords: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        coords
            .into_iter()
            .filter_map(|c| self.project(c.x, c.y))
            .fold(None, |acc: Option<Bounds>, (x, y)| {
                Some(acc.map_or([[x, y], [x, y]], |[[x0, y0], [x1, y1]]| {
                    [[x0.min(x), y0.min(y)], [x1.max(x), y1.max(y)]]
                }))
            })
    }
}
