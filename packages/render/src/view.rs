//! A fully drawn map: scene plus the index maps the interaction layer
//! needs to address its elements.

use case_map_case_models::{CaseEvent, CategorySet, Region, StreetSegment};
use case_map_projection::ConicEqualArea;

use crate::color::ColorScale;
use crate::layers::{
    BasemapLayer, CaseLayer, OverlayLayer, StreetLayer, draw_basemap, draw_cases, draw_overlays,
    draw_streets,
};
use crate::scene::Scene;
use crate::svg::{SvgGroup, render_svg, render_svg_with};
use crate::zoom::ZoomTransform;

#[derive(Debug, Clone)]
pub struct MapView {
    pub scene: Scene,
    pub basemap: BasemapLayer,
    pub streets: StreetLayer,
    pub cases: CaseLayer,
    pub overlays: OverlayLayer,
    pub colors: ColorScale,
    pub zoom: ZoomTransform,
}

impl MapView {
    /// Draws every layer in stacking order.
    ///
    /// The color scale is seeded from the cases' categories so the legend
    /// and the markers agree on colors regardless of draw order.
    #[must_use]
    pub fn build(
        projection: &ConicEqualArea,
        regions: &[Region],
        streets: &[StreetSegment],
        cases: &[CaseEvent],
        width: f64,
        height: f64,
    ) -> Self {
        let mut scene = Scene::new(width, height);
        let mut colors = ColorScale::from_categories(&CategorySet::from_events(cases));

        let basemap = draw_basemap(&mut scene, projection, regions);
        let street_layer = draw_streets(&mut scene, projection, streets);
        let case_layer = draw_cases(&mut scene, cases, &mut colors);
        let overlays = draw_overlays(&mut scene);

        log::debug!(
            "Built map view: {} regions, {} streets, {} cases",
            regions.len(),
            street_layer.lines.len(),
            case_layer.markers.len()
        );

        Self {
            scene,
            basemap,
            streets: street_layer,
            cases: case_layer,
            overlays,
            colors,
            zoom: ZoomTransform::IDENTITY,
        }
    }

    /// Zooms by `factor` about the center of the map, within the zoom
    /// scale extent.
    pub fn zoom_by(&mut self, factor: f64) {
        let (cx, cy) = (self.scene.width() / 2.0, self.scene.height() / 2.0);
        self.zoom = self.zoom.scale_by(factor, cx, cy);
    }

    /// Pans by `(dx, dy)` screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.zoom = self.zoom.translate_by(dx, dy);
    }

    #[must_use]
    pub fn to_svg(&self) -> String {
        render_svg(&self.scene, &self.zoom)
    }

    #[must_use]
    pub fn to_svg_with(&self, extra: &[SvgGroup]) -> String {
        render_svg_with(&self.scene, &self.zoom, extra)
    }
}
