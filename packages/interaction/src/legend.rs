//! Category legend with clickable swatches.

use case_map_render::svg::{SvgGroup, num};
use svg::node::element::{Group, Rectangle, Text};

use crate::controller::InteractionController;
use crate::state::AppState;

/// Outer legend size.
pub const LEGEND_SIZE: [f64; 2] = [200.0, 200.0];
pub const LEGEND_MARGIN: f64 = 20.0;
pub const LEGEND_TITLE: &str = "Request Source";

const ROW_HEIGHT: f64 = 20.0;
const SWATCH_SIZE: f64 = 18.0;
const LABEL_GAP: f64 = 24.0;
const LABEL_Y: f64 = 10.0;

/// Fill used if a category somehow has no scale entry.
const FALLBACK_FILL: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub category: String,
    pub color: &'static str,
    /// Swatch toggle state, flipped on every click.
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    /// Inner width, inside the left and right margins.
    width: f64,
}

impl Legend {
    /// One entry per loaded category, colored with the markers' scale.
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        let entries = state
            .categories
            .iter()
            .map(|category| LegendEntry {
                category: category.to_string(),
                color: state.view.colors.get(category).unwrap_or(FALLBACK_FILL),
                hidden: false,
            })
            .collect();
        Self {
            entries,
            width: 2.0f64.mul_add(-LEGEND_MARGIN, LEGEND_SIZE[0]),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Transform of the row at `index`.
    #[must_use]
    pub fn row_transform(index: usize) -> String {
        #[allow(clippy::cast_precision_loss)]
        let y = index as f64 * ROW_HEIGHT;
        format!("translate(0,{})", num(y))
    }

    #[must_use]
    pub fn swatch_x(&self) -> f64 {
        self.width - SWATCH_SIZE
    }

    #[must_use]
    pub fn label_x(&self) -> f64 {
        self.width - LABEL_GAP
    }

    /// Filters the map by the swatch's category and toggles the swatch.
    /// Returns the category, or `None` for an out-of-range index.
    pub fn click_swatch(
        &mut self,
        index: usize,
        controller: &mut InteractionController,
    ) -> Option<&str> {
        let entry = self.entries.get_mut(index)?;
        controller.apply_filter(&entry.category);
        entry.hidden = !entry.hidden;
        Some(&entry.category)
    }

    /// Selects the swatch labeled `category`.
    pub fn click_category(
        &mut self,
        category: &str,
        controller: &mut InteractionController,
    ) -> Option<&str> {
        let index = self.entries.iter().position(|e| e.category == category)?;
        self.click_swatch(index, controller)
    }

    /// The title and rows, in legend-local coordinates.
    #[must_use]
    pub fn to_group(&self) -> Group {
        let title = Text::new(LEGEND_TITLE)
            .set("class", "label")
            .set("x", num(self.width - 30.0))
            .set("y", -10)
            .set("dy", ".15em")
            .set("font-size", 14)
            .set("text-anchor", "middle");
        let mut group = Group::new().add(title);

        for (index, entry) in self.entries.iter().enumerate() {
            let label = Text::new(entry.category.as_str())
                .set("x", num(self.label_x()))
                .set("y", num(LABEL_Y))
                .set("text-anchor", "end");
            let mut swatch = Rectangle::new()
                .set("x", num(self.swatch_x()))
                .set("width", num(SWATCH_SIZE))
                .set("height", num(SWATCH_SIZE))
                .set("fill", entry.color);
            if entry.hidden {
                swatch = swatch.set("class", "hidden");
            }
            group = group.add(
                Group::new()
                    .set("class", "legend")
                    .set("transform", Self::row_transform(index))
                    .add(label)
                    .add(swatch),
            );
        }
        group
    }

    /// The legend as a group placed to the right of a map `map_width` wide.
    #[must_use]
    pub fn to_svg_group(&self, map_width: f64) -> SvgGroup {
        SvgGroup {
            group: Group::new()
                .set("id", "legend")
                .set(
                    "transform",
                    format!("translate({},{})", num(map_width), num(LEGEND_MARGIN)),
                )
                .add(self.to_group()),
            width: LEGEND_SIZE[0],
        }
    }
}
