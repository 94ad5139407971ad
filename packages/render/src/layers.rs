//! Materializes domain records as scene elements.
//!
//! Each `draw_*` function appends one element per record to its layer and
//! returns an index from record id to element id. Lookups in the other
//! direction go through [`CaseLayer::case_for`].

use std::collections::BTreeMap;

use case_map_case_models::{CaseEvent, CaseId, Region, RegionId, StreetSegment};
use case_map_projection::ConicEqualArea;
use svg::node::element::path::Data;

use crate::color::ColorScale;
use crate::path::{line_path, polygon_path};
use crate::scene::{Element, ElementClass, ElementId, LayerName, Scene, Shape, TextAnchor};

/// Offset of the region-name tooltip from the pointer.
pub const TOOLTIP_OFFSET: [f64; 2] = [-5.0, -5.0];

/// Initial content of the details surface.
pub const DETAILS_PLACEHOLDER: &str = "<p>N/A</p>";

/// Basemap elements, indexed by [`RegionId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasemapLayer {
    /// Fill shapes in the basemap layer.
    pub land: Vec<ElementId>,
    /// Outline shapes in the outline layer, used for highlighting.
    pub outlines: Vec<ElementId>,
}

impl BasemapLayer {
    #[must_use]
    pub fn land(&self, region: RegionId) -> Option<ElementId> {
        self.land.get(region.0).copied()
    }

    #[must_use]
    pub fn outline(&self, region: RegionId) -> Option<ElementId> {
        self.outlines.get(region.0).copied()
    }
}

/// Street elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetLayer {
    pub lines: Vec<ElementId>,
    /// Inactive segments that were not drawn.
    pub dropped: usize,
}

/// Case markers, indexed by [`CaseId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseLayer {
    pub markers: Vec<ElementId>,
    by_element: BTreeMap<ElementId, CaseId>,
}

impl CaseLayer {
    #[must_use]
    pub fn marker(&self, case: CaseId) -> Option<ElementId> {
        self.markers.get(case.0).copied()
    }

    /// The case a marker element is bound to.
    #[must_use]
    pub fn case_for(&self, element: ElementId) -> Option<CaseId> {
        self.by_element.get(&element).copied()
    }
}

/// The region-name tooltip and the secondary details surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayer {
    pub tooltip: ElementId,
    pub details: ElementId,
}

/// Draws a fill shape and an outline shape per region.
///
/// Regions whose geometry does not project still get (empty) elements so
/// the region-to-element index stays dense.
pub fn draw_basemap(
    scene: &mut Scene,
    projection: &ConicEqualArea,
    regions: &[Region],
) -> BasemapLayer {
    let mut layer = BasemapLayer::default();
    for region in regions {
        let d = polygon_path(projection, &region.geometry).unwrap_or_else(|| {
            log::warn!("Region '{}' has no projectable geometry", region.name);
            Data::new()
        });
        layer.land.push(scene.add(
            Element::new(LayerName::Basemap, Shape::Path { d: d.clone() })
                .with_class(ElementClass::Land),
        ));
        layer.outlines.push(scene.add(
            Element::new(LayerName::Outline, Shape::Path { d })
                .with_class(ElementClass::Neighborhood),
        ));
    }
    log::debug!("Drew {} basemap regions", regions.len());
    layer
}

/// Draws one line per active street segment.
pub fn draw_streets(
    scene: &mut Scene,
    projection: &ConicEqualArea,
    streets: &[StreetSegment],
) -> StreetLayer {
    let mut layer = StreetLayer::default();
    for segment in streets {
        if !segment.active {
            layer.dropped += 1;
            continue;
        }
        let Some(d) = line_path(projection, &segment.geometry) else {
            continue;
        };
        layer.lines.push(scene.add(
            Element::new(LayerName::Streets, Shape::Path { d }).with_class(ElementClass::Street),
        ));
    }
    log::info!("Removed {} inactive streets", layer.dropped);
    layer
}

/// Draws one marker per case, colored by its category.
pub fn draw_cases(scene: &mut Scene, cases: &[CaseEvent], colors: &mut ColorScale) -> CaseLayer {
    let mut layer = CaseLayer::default();
    for (index, case) in cases.iter().enumerate() {
        let id = scene.add(
            Element::new(
                LayerName::Cases,
                Shape::Circle {
                    cx: case.x,
                    cy: case.y,
                    r: case.radius,
                },
            )
            .with_class(ElementClass::Symbol)
            .with_fill(colors.color(&case.source)),
        );
        layer.markers.push(id);
        layer.by_element.insert(id, CaseId(index));
    }
    layer
}

/// Creates the hidden region-name tooltip and details surface.
pub fn draw_overlays(scene: &mut Scene) -> OverlayLayer {
    let tooltip = scene.add(
        Element::new(
            LayerName::Tooltip,
            Shape::Text {
                x: 0.0,
                y: 0.0,
                dx: TOOLTIP_OFFSET[0],
                dy: TOOLTIP_OFFSET[1],
                anchor: TextAnchor::End,
                text: String::new(),
            },
        )
        .with_visible(false),
    );
    let details = scene.add(
        Element::new(
            LayerName::Details,
            Shape::ForeignObject {
                x: 0.0,
                y: 0.0,
                width: scene.width(),
                height: scene.height(),
                html: DETAILS_PLACEHOLDER.to_string(),
            },
        )
        .with_visible(false),
    );
    OverlayLayer { tooltip, details }
}

#[cfg(test)]
mod tests {
    use geo::{MultiLineString, MultiPolygon, line_string, polygon};

    use super::*;

    fn projection() -> ConicEqualArea {
        ConicEqualArea::new()
            .with_parallels([37.692_514, 37.840_699])
            .with_rotate(122.0)
            .with_scale(100_000.0)
    }

    fn segment(active: bool) -> StreetSegment {
        StreetSegment {
            geometry: MultiLineString(vec![line_string![
                (x: -122.42, y: 37.75),
                (x: -122.40, y: 37.75),
            ]]),
            active,
        }
    }

    fn region(name: &str) -> Region {
        Region {
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: -122.42, y: 37.75),
                (x: -122.40, y: 37.75),
                (x: -122.40, y: 37.77),
            ]]),
        }
    }

    #[test]
    fn inactive_streets_are_never_drawn() {
        let streets: Vec<StreetSegment> = (0..100).map(|i| segment(i % 10 >= 3)).collect();
        assert_eq!(streets.iter().filter(|s| !s.active).count(), 30);

        let mut scene = Scene::new(960.0, 600.0);
        let layer = draw_streets(&mut scene, &projection(), &streets);

        assert_eq!(layer.lines.len(), 70);
        assert_eq!(layer.dropped, 30);
        assert_eq!(scene.draw_order(LayerName::Streets).len(), 70);
    }

    #[test]
    fn each_region_gets_exactly_one_outline() {
        let regions = vec![region("Mission"), region("Castro"), region("Marina")];
        let mut scene = Scene::new(960.0, 600.0);
        let layer = draw_basemap(&mut scene, &projection(), &regions);

        assert_eq!(layer.outlines.len(), regions.len());
        assert_eq!(layer.land.len(), regions.len());
        assert_eq!(scene.draw_order(LayerName::Outline).len(), regions.len());

        let mut unique = layer.outlines.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), regions.len());

        for id in &layer.outlines {
            assert!(scene.has_class(*id, ElementClass::Neighborhood));
        }
    }

    #[test]
    fn overlays_start_hidden() {
        let mut scene = Scene::new(960.0, 600.0);
        let overlays = draw_overlays(&mut scene);
        assert!(!scene.get(overlays.tooltip).unwrap().visible);
        assert!(!scene.get(overlays.details).unwrap().visible);
    }
}
