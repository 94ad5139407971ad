//! Standalone HTML page holding the map, the legend, and the detail panel.

use std::fmt::Write as _;

use case_map_render::svg::num;
use svg::Document;
use svg::node::element::Group;

use crate::controller::InteractionController;
use crate::legend::{LEGEND_MARGIN, LEGEND_SIZE, Legend};

const STYLE: &str = "\
.land { fill: #e6e6e6; stroke: none; }
.neighborhood { fill: none; stroke: #ffffff; stroke-width: 1px; }
.neighborhood.active { stroke: #333333; stroke-width: 2px; }
.street { fill: none; stroke: #bbbbbb; stroke-width: 0.5px; }
.symbol { stroke: #ffffff; stroke-width: 0.5px; }
.symbol.active { stroke: #000000; stroke-width: 2px; }
.hidden { opacity: 0; }
#tooltip { font-size: 12px; pointer-events: none; }
.container { position: relative; }
.tooltip { position: absolute; pointer-events: none; background: #ffffff; padding: 4px; }
";

/// Renders the page in its current interaction state. The detail panel is
/// written at the opacity its latest fade settles on.
#[must_use]
pub fn render_page(controller: &InteractionController, legend: &Legend) -> String {
    let view = &controller.state.view;
    let panel = &controller.panel;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Street and Sidewalk Cleaning Requests</title>\n");
    let _ = writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>");
    html.push_str("<section id=\"d3ImplementationSection\">\n<div class=\"container\">\n");
    html.push_str(&view.to_svg());
    let _ = writeln!(
        html,
        r#"<div class="tooltip" style="opacity: {}; left: {}px; top: {}px;">{}</div>"#,
        num(panel.opacity()),
        num(panel.left),
        num(panel.top),
        panel.html
    );
    html.push_str("</div>\n");
    let legend_svg = Document::new()
        .set("id", "legend-svg")
        .set("width", num(LEGEND_SIZE[0]))
        .set("height", num(LEGEND_SIZE[1]))
        .add(
            Group::new()
                .set("transform", format!("translate(0,{})", num(LEGEND_MARGIN)))
                .add(legend.to_group()),
        );
    let _ = writeln!(html, "{legend_svg}");
    html.push_str("</section>\n</body>\n</html>\n");
    html
}
