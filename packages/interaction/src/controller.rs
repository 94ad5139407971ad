//! Pointer and filter handling over an [`AppState`].
//!
//! Pointer positions are in page coordinates. The [`Layout`] gives the page
//! origins of the map's SVG root and of its surrounding container, which
//! the region tooltip and the floating detail panel are positioned against.

use case_map_case_models::{CaseId, RegionId};
use case_map_render::scene::Shape;
use case_map_render::{ElementClass, ElementId, bring_to_front};

use crate::detail::detail_table;
use crate::filter::FilterPolicy;
use crate::state::AppState;
use crate::transition::{FADE_DURATION, Transition};

/// Offset of the detail panel from the pointer, relative to the container.
pub const PANEL_OFFSET: Point = Point::new(15.0, 30.0);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Page positions of the map surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    /// Top-left of the SVG root.
    pub svg_origin: Point,
    /// Top-left of the container holding the SVG and the detail panel.
    pub container_origin: Point,
}

/// The floating HTML panel showing a case's details.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub html: String,
    pub left: f64,
    pub top: f64,
    /// Current opacity fade.
    pub fade: Transition,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self {
            html: String::new(),
            left: 0.0,
            top: 0.0,
            fade: Transition::settled(0.0),
        }
    }
}

impl DetailPanel {
    /// Opacity once the current fade completes.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        self.fade.to
    }

    fn fade_to(&mut self, opacity: f64) {
        // Starts from the previous target; an interrupted fade is not resumed mid-way.
        self.fade = Transition::new(self.fade.to, opacity, FADE_DURATION);
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    pub state: AppState,
    pub policy: FilterPolicy,
    pub layout: Layout,
    pub panel: DetailPanel,
}

impl InteractionController {
    #[must_use]
    pub fn new(state: AppState, policy: FilterPolicy, layout: Layout) -> Self {
        Self {
            state,
            policy,
            layout,
            panel: DetailPanel::default(),
        }
    }

    fn outline(&self, region: RegionId) -> Option<ElementId> {
        self.state.view.basemap.outline(region)
    }

    fn marker(&self, case: CaseId) -> Option<ElementId> {
        self.state.view.cases.marker(case)
    }

    /// Pointer position in the basemap layer's coordinates.
    fn layer_point(&self, pointer: Point) -> Point {
        let (x, y) = self.state.view.zoom.invert(
            pointer.x - self.layout.svg_origin.x,
            pointer.y - self.layout.svg_origin.y,
        );
        Point::new(x, y)
    }

    fn move_tooltip(&mut self, pointer: Point) {
        let at = self.layer_point(pointer);
        let tooltip = self.state.view.overlays.tooltip;
        if let Some(element) = self.state.view.scene.get_mut(tooltip)
            && let Shape::Text { x, y, .. } = &mut element.shape
        {
            *x = at.x;
            *y = at.y;
        }
    }

    /// Highlights `region`'s outline and shows its name at the pointer.
    pub fn region_enter(&mut self, region: RegionId, pointer: Point) -> bool {
        let Some(outline) = self.outline(region) else {
            log::debug!("Pointer entered unknown region {}", region.0);
            return false;
        };
        let name = self
            .state
            .region(region)
            .map(|r| r.name.clone())
            .unwrap_or_default();

        let scene = &mut self.state.view.scene;
        bring_to_front(scene, outline);
        scene.set_class(outline, ElementClass::Active, true);

        let tooltip = self.state.view.overlays.tooltip;
        if let Some(element) = scene.get_mut(tooltip)
            && let Shape::Text { text, .. } = &mut element.shape
        {
            *text = name;
        }
        scene.set_visible(tooltip, true);
        self.move_tooltip(pointer);
        true
    }

    pub fn region_move(&mut self, region: RegionId, pointer: Point) {
        if self.outline(region).is_some() {
            self.move_tooltip(pointer);
        }
    }

    /// Clears the highlight and hides the tooltip.
    pub fn region_leave(&mut self, region: RegionId) {
        if let Some(outline) = self.outline(region) {
            self.state
                .view
                .scene
                .set_class(outline, ElementClass::Active, false);
        }
        let tooltip = self.state.view.overlays.tooltip;
        self.state.view.scene.set_visible(tooltip, false);
    }

    fn place_panel(&mut self, pointer: Point) {
        let container = self.layout.container_origin;
        self.panel.left = pointer.x - container.x + PANEL_OFFSET.x;
        self.panel.top = pointer.y - container.y + PANEL_OFFSET.y;
    }

    /// Raises and highlights the marker and fades in its detail panel.
    /// Returns `false` without side effects for hidden or unknown markers.
    pub fn marker_enter(&mut self, case: CaseId, pointer: Point) -> bool {
        let Some(marker) = self.marker(case) else {
            return false;
        };
        if self.state.view.scene.has_class(marker, ElementClass::Hidden) {
            return false;
        }
        let Some(html) = self.state.case(case).map(detail_table) else {
            return false;
        };

        let scene = &mut self.state.view.scene;
        bring_to_front(scene, marker);
        scene.set_class(marker, ElementClass::Active, true);

        let details = self.state.view.overlays.details;
        if let Some(element) = scene.get_mut(details)
            && let Shape::ForeignObject { html: body, .. } = &mut element.shape
        {
            body.clone_from(&html);
        }
        scene.set_visible(details, false);

        self.panel.html = html;
        self.place_panel(pointer);
        self.panel.fade_to(1.0);
        true
    }

    /// Moves the detail panel with the pointer.
    pub fn marker_move(&mut self, case: CaseId, pointer: Point) {
        let Some(marker) = self.marker(case) else {
            return;
        };
        if !self.state.view.scene.has_class(marker, ElementClass::Hidden) {
            self.place_panel(pointer);
        }
    }

    /// Clears the highlight, fades out the panel, and hides the details
    /// surface.
    pub fn marker_leave(&mut self, case: CaseId) {
        if let Some(marker) = self.marker(case) {
            self.state
                .view
                .scene
                .set_class(marker, ElementClass::Active, false);
        }
        let details = self.state.view.overlays.details;
        self.state.view.scene.set_visible(details, false);
        self.panel.fade_to(0.0);
    }

    /// Applies the legend filter for `category` under the configured policy.
    /// Matching markers are raised above the rest in their original order.
    pub fn apply_filter(&mut self, category: &str) {
        let scene = &mut self.state.view.scene;
        let mut raised = 0_usize;
        for (index, case) in self.state.cases.iter().enumerate() {
            let Some(marker) = self.state.view.cases.marker(CaseId(index)) else {
                continue;
            };
            let matches = case.is_category(category);
            let hidden = scene.has_class(marker, ElementClass::Hidden);
            if let Some(next) = self.policy.next_hidden(hidden, matches) {
                scene.set_class(marker, ElementClass::Hidden, next);
            }
            if matches {
                bring_to_front(scene, marker);
                raised += 1;
            }
        }
        log::debug!(
            "Applied {} filter for '{category}': {raised} raised, {} hidden",
            self.policy,
            self.hidden_count()
        );
    }

    /// Number of markers currently filtered out.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.state
            .view
            .cases
            .markers
            .iter()
            .filter(|id| self.state.view.scene.has_class(**id, ElementClass::Hidden))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use case_map_case_models::{CASE_RADIUS, CaseEvent, Region};
    use case_map_projection::ConicEqualArea;
    use case_map_render::LayerName;
    use case_map_render::scene::Element;
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn case(source: &str, index: usize) -> CaseEvent {
        #[allow(clippy::cast_precision_loss)]
        let x = index as f64 * 10.0;
        CaseEvent {
            service_request_id: Some(format!("{index}")),
            requested_datetime: Some("2020-03-15T10:00:00".to_string()),
            requested_at: chrono::NaiveDate::from_ymd_opt(2020, 3, 15)
                .and_then(|d| d.and_hms_opt(10, 0, 0)),
            status_description: Some("Open".to_string()),
            neighborhood: Some("Mission".to_string()),
            service_subtype: None,
            service_details: None,
            source: source.to_string(),
            longitude: -122.41,
            latitude: 37.76,
            x,
            y: 100.0,
            radius: CASE_RADIUS,
            collided: false,
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

    fn controller(sources: &[&str], policy: FilterPolicy) -> InteractionController {
        let cases = sources
            .iter()
            .enumerate()
            .map(|(i, s)| case(s, i))
            .collect();
        let projection = ConicEqualArea::new()
            .with_parallels([37.692_514, 37.840_699])
            .with_rotate(122.0);
        let regions = vec![region("Mission"), region("Castro"), region("Marina")];
        let state = AppState::build(&projection, regions, &[], cases, 960.0, 600.0);
        InteractionController::new(state, policy, Layout::default())
    }

    fn hidden(controller: &InteractionController) -> Vec<bool> {
        controller
            .state
            .view
            .cases
            .markers
            .iter()
            .map(|id| controller.state.view.scene.has_class(*id, ElementClass::Hidden))
            .collect()
    }

    fn element(controller: &InteractionController, id: ElementId) -> &Element {
        controller.state.view.scene.get(id).unwrap()
    }

    const MIXED: [&str; 10] = [
        "Phone",
        "Mobile App",
        "Web",
        "Phone",
        "Mobile App",
        "Phone",
        "Web",
        "Mobile App",
        "Phone",
        "Web",
    ];

    #[test]
    fn mobile_app_filter_hides_the_other_seven_and_raises_three() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.apply_filter("Mobile App");

        let hidden = hidden(&controller);
        for (source, hidden) in MIXED.iter().zip(&hidden) {
            assert_eq!(*hidden, *source != "Mobile App");
        }
        assert_eq!(controller.hidden_count(), 7);

        let order = controller.state.view.scene.draw_order(LayerName::Cases);
        let top: Vec<CaseId> = order[7..]
            .iter()
            .map(|id| controller.state.view.cases.case_for(*id).unwrap())
            .collect();
        assert_eq!(top, vec![CaseId(1), CaseId(4), CaseId(7)]);
    }

    #[test]
    fn flip_twice_restores_others_and_never_touches_matches() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.apply_filter("Web");
        let before = hidden(&controller);

        controller.apply_filter("Phone");
        let after_first = hidden(&controller);
        controller.apply_filter("Phone");
        let after_second = hidden(&controller);

        assert_eq!(before, after_second);
        for (i, source) in MIXED.iter().enumerate() {
            if *source == "Phone" {
                assert_eq!(before[i], after_first[i]);
            } else {
                assert_ne!(before[i], after_first[i]);
            }
        }
    }

    #[test]
    fn isolate_shows_only_the_selected_category() {
        let mut controller = controller(&MIXED, FilterPolicy::Isolate);
        controller.apply_filter("Web");
        controller.apply_filter("Web");
        let hidden = hidden(&controller);
        for (source, hidden) in MIXED.iter().zip(&hidden) {
            assert_eq!(*hidden, *source != "Web");
        }
    }

    #[test]
    fn hidden_markers_ignore_hover() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.apply_filter("Phone");
        let marker = controller.state.view.cases.marker(CaseId(1)).unwrap();
        let z = controller.state.view.scene.z_index(marker);

        assert!(!controller.marker_enter(CaseId(1), Point::new(100.0, 100.0)));
        assert!(!controller.state.view.scene.has_class(marker, ElementClass::Active));
        assert_eq!(controller.state.view.scene.z_index(marker), z);
        assert!(controller.panel.opacity().abs() < f64::EPSILON);
    }

    #[test]
    fn marker_hover_shows_panel_relative_to_container() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.layout.container_origin = Point::new(40.0, 200.0);

        assert!(controller.marker_enter(CaseId(0), Point::new(300.0, 450.0)));
        let marker = controller.state.view.cases.marker(CaseId(0)).unwrap();
        assert!(controller.state.view.scene.has_class(marker, ElementClass::Active));
        assert_eq!(controller.state.view.scene.z_index(marker), Some(9));

        assert!((controller.panel.left - 275.0).abs() < f64::EPSILON);
        assert!((controller.panel.top - 280.0).abs() < f64::EPSILON);
        assert_eq!(controller.panel.fade, Transition::new(0.0, 1.0, FADE_DURATION));
        assert!(controller.panel.html.contains("3/15/2020, 10:00:00 AM"));
        assert!(controller.panel.html.contains("Phone"));

        controller.marker_move(CaseId(0), Point::new(310.0, 455.0));
        assert!((controller.panel.left - 285.0).abs() < f64::EPSILON);
        assert!((controller.panel.opacity() - 1.0).abs() < f64::EPSILON);

        controller.marker_leave(CaseId(0));
        assert!(!controller.state.view.scene.has_class(marker, ElementClass::Active));
        assert_eq!(controller.panel.fade, Transition::new(1.0, 0.0, FADE_DURATION));
        let details = controller.state.view.overlays.details;
        assert!(!element(&controller, details).visible);
    }

    #[test]
    fn region_highlight_is_independent_per_region() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        let outline =
            |c: &InteractionController, i| c.state.view.basemap.outline(RegionId(i)).unwrap();

        assert!(controller.region_enter(RegionId(0), Point::new(10.0, 10.0)));
        assert!(controller.region_enter(RegionId(2), Point::new(10.0, 10.0)));
        let (a, b, c) = (
            outline(&controller, 0),
            outline(&controller, 1),
            outline(&controller, 2),
        );
        let scene = &controller.state.view.scene;
        assert!(scene.has_class(a, ElementClass::Active));
        assert!(!scene.has_class(b, ElementClass::Active));
        assert!(scene.has_class(c, ElementClass::Active));
        assert_eq!(scene.z_index(c), Some(2));

        controller.region_leave(RegionId(0));
        let scene = &controller.state.view.scene;
        assert!(!scene.has_class(a, ElementClass::Active));
        assert!(scene.has_class(c, ElementClass::Active));
    }

    #[test]
    fn tooltip_tracks_pointer_in_layer_coordinates() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.layout.svg_origin = Point::new(8.0, 50.0);
        controller.state.view.zoom = case_map_render::ZoomTransform {
            k: 2.0,
            x: 100.0,
            y: 0.0,
        };

        controller.region_enter(RegionId(1), Point::new(308.0, 250.0));
        let tooltip = controller.state.view.overlays.tooltip;
        let Shape::Text { x, y, text, .. } = &element(&controller, tooltip).shape else {
            panic!("tooltip is not text");
        };
        assert_eq!(text, "Castro");
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 100.0).abs() < 1e-9);
        assert!(element(&controller, tooltip).visible);

        controller.region_move(RegionId(1), Point::new(328.0, 270.0));
        let Shape::Text { x, y, .. } = &element(&controller, tooltip).shape else {
            panic!("tooltip is not text");
        };
        assert!((x - 110.0).abs() < 1e-9);
        assert!((y - 110.0).abs() < 1e-9);
        assert!(element(&controller, tooltip).visible);

        controller.region_leave(RegionId(1));
        assert!(!element(&controller, tooltip).visible);
        assert!(controller.state.view.scene.get(tooltip).is_some());
    }

    #[test]
    fn tooltip_follows_pointer_without_zoom() {
        let mut controller = controller(&MIXED, FilterPolicy::Flip);
        controller.layout.svg_origin = Point::new(10.0, 20.0);
        let tooltip = controller.state.view.overlays.tooltip;
        let at = |c: &InteractionController, ex: f64, ey: f64| match &element(c, tooltip).shape {
            Shape::Text { x, y, .. } => (x - ex).abs() < 1e-9 && (y - ey).abs() < 1e-9,
            _ => panic!("tooltip is not text"),
        };

        controller.region_enter(RegionId(0), Point::new(50.0, 60.0));
        assert!(at(&controller, 40.0, 40.0));

        controller.region_move(RegionId(0), Point::new(70.0, 90.0));
        assert!(at(&controller, 60.0, 70.0));

        // Moves over an unknown region leave the tooltip alone.
        controller.region_move(RegionId(99), Point::new(500.0, 500.0));
        assert!(at(&controller, 60.0, 70.0));

        controller.region_leave(RegionId(0));
        assert!(!element(&controller, tooltip).visible);
    }
}
