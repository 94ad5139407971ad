//! Application state shared by the controller and the legend.

use case_map_case_models::{CaseEvent, CaseId, CategorySet, Region, RegionId, StreetSegment};
use case_map_projection::ConicEqualArea;
use case_map_render::MapView;

/// Loaded records and their rendered view.
///
/// Built once after loading completes, so nothing can be hovered or
/// filtered before the cases exist.
#[derive(Debug, Clone)]
pub struct AppState {
    pub regions: Vec<Region>,
    pub cases: Vec<CaseEvent>,
    pub categories: CategorySet,
    pub view: MapView,
}

impl AppState {
    #[must_use]
    pub fn new(regions: Vec<Region>, cases: Vec<CaseEvent>, view: MapView) -> Self {
        let categories = CategorySet::from_events(&cases);
        Self {
            regions,
            cases,
            categories,
            view,
        }
    }

    /// Draws the map for the loaded records and wraps it in a state.
    #[must_use]
    pub fn build(
        projection: &ConicEqualArea,
        regions: Vec<Region>,
        streets: &[StreetSegment],
        cases: Vec<CaseEvent>,
        width: f64,
        height: f64,
    ) -> Self {
        let view = MapView::build(projection, &regions, streets, &cases, width, height);
        Self::new(regions, cases, view)
    }

    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    #[must_use]
    pub fn case(&self, id: CaseId) -> Option<&CaseEvent> {
        self.cases.get(id.0)
    }

    /// Ids of the cases reported through `category`.
    pub fn cases_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = CaseId> + 'a {
        self.cases
            .iter()
            .enumerate()
            .filter(move |(_, case)| case.is_category(category))
            .map(|(index, _)| CaseId(index))
    }
}
