//! Standalone SVG export of a [`Scene`].

use svg::node::Blob;
use svg::node::element::{Circle, Element as XmlElement, ForeignObject, Group, Path, Text};
use svg::{Document, Node};

use crate::scene::{Element, LayerName, Scene, Shape};
use crate::zoom::ZoomTransform;

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// An extra top-level group placed beside the map, outside the zoom
/// transform.
#[derive(Debug, Clone)]
pub struct SvgGroup {
    pub group: Group,
    /// Horizontal space the group needs to the right of the map.
    pub width: f64,
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
#[must_use]
pub fn num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Copies the element's classes, fill, opacity, and visibility onto `node`.
fn styled<T: Node>(mut node: T, element: &Element) -> T {
    if !element.classes.is_empty() {
        let classes: Vec<&str> = element.classes.iter().map(|c| c.as_ref()).collect();
        node.assign("class", classes.join(" "));
    }
    if let Some(fill) = &element.fill {
        node.assign("fill", fill.as_str());
    }
    if element.opacity() < 1.0 {
        node.assign("style", format!("opacity: {}", num(element.opacity())));
    }
    if !element.visible {
        node.assign("visibility", "hidden");
    }
    node
}

fn to_node(element: &Element) -> Box<dyn Node> {
    match &element.shape {
        Shape::Path { d } => Box::new(styled(Path::new().set("d", d.clone()), element)),
        Shape::Circle { cx, cy, r } => Box::new(styled(
            Circle::new()
                .set("cx", num(*cx))
                .set("cy", num(*cy))
                .set("r", num(*r)),
            element,
        )),
        Shape::Text {
            x,
            y,
            dx,
            dy,
            anchor,
            text,
        } => Box::new(styled(
            Text::new(text.as_str())
                .set("x", num(*x))
                .set("y", num(*y))
                .set("dx", num(*dx))
                .set("dy", num(*dy))
                .set("text-anchor", anchor.to_string()),
            element,
        )),
        Shape::ForeignObject {
            x,
            y,
            width,
            height,
            html,
        } => {
            // Content is already-serialized XHTML.
            let mut body = XmlElement::new("div");
            body.assign("xmlns", XHTML_NS);
            body.append(Blob::new(html.as_str()));
            Box::new(styled(
                ForeignObject::new()
                    .set("x", num(*x))
                    .set("y", num(*y))
                    .set("width", num(*width))
                    .set("height", num(*height))
                    .add(body),
                element,
            ))
        }
    }
}

/// The zoomable map group holding one `g#<layer>` per layer.
#[must_use]
pub fn map_group(scene: &Scene, zoom: &ZoomTransform) -> Group {
    let mut map = Group::new().set("transform", zoom.to_svg());
    for layer in LayerName::ALL {
        let mut group = Group::new().set("id", layer.to_string());
        for id in scene.draw_order(layer) {
            if let Some(element) = scene.get(*id) {
                group = group.add(to_node(element));
            }
        }
        map = map.add(group);
    }
    map
}

/// Renders `scene` as an SVG document.
#[must_use]
pub fn render_svg(scene: &Scene, zoom: &ZoomTransform) -> String {
    render_svg_with(scene, zoom, &[])
}

/// Renders `scene` followed by `extra` groups laid out to its right.
#[must_use]
pub fn render_svg_with(scene: &Scene, zoom: &ZoomTransform, extra: &[SvgGroup]) -> String {
    let width = scene.width() + extra.iter().map(|g| g.width).sum::<f64>();
    let mut document = Document::new()
        .set("id", "vis")
        .set("width", num(width))
        .set("height", num(scene.height()))
        .add(map_group(scene, zoom));
    for group in extra {
        document = document.add(group.group.clone());
    }
    document.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ElementClass, TextAnchor};

    #[test]
    fn layers_are_written_in_stacking_order() {
        let scene = Scene::new(960.0, 600.0);
        let svg = render_svg(&scene, &ZoomTransform::IDENTITY);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"id="vis""#));
        assert!(svg.contains(r#"width="960""#));
        assert!(svg.contains(r#"height="600""#));
        let positions: Vec<usize> = LayerName::ALL
            .iter()
            .map(|l| svg.find(&format!(r#"id="{l}""#)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn hidden_markers_render_transparent() {
        let mut scene = Scene::new(960.0, 600.0);
        scene.add(
            Element::new(
                LayerName::Cases,
                Shape::Circle {
                    cx: 10.0,
                    cy: 20.5,
                    r: 5.0,
                },
            )
            .with_class(ElementClass::Symbol)
            .with_class(ElementClass::Hidden)
            .with_fill("#1f77b4"),
        );
        let svg = render_svg(&scene, &ZoomTransform::IDENTITY);
        assert!(svg.contains(r#"class="symbol hidden""#));
        assert!(svg.contains(r#"style="opacity: 0""#));
        assert!(svg.contains(r##"fill="#1f77b4""##));
        assert!(svg.contains(r#"cy="20.5""#));
    }

    #[test]
    fn invisible_text_is_retained_and_escaped() {
        let mut scene = Scene::new(960.0, 600.0);
        scene.add(
            Element::new(
                LayerName::Tooltip,
                Shape::Text {
                    x: 1.0,
                    y: 2.0,
                    dx: -5.0,
                    dy: -5.0,
                    anchor: TextAnchor::End,
                    text: "Bayview <Hunters Point>".to_string(),
                },
            )
            .with_visible(false),
        );
        let svg = render_svg(&scene, &ZoomTransform::IDENTITY);
        assert!(svg.contains(r#"visibility="hidden""#));
        assert!(svg.contains("Bayview &lt;Hunters Point&gt;"));
        assert!(!svg.contains("<Hunters Point>"));
        assert!(svg.contains(r#"text-anchor="end""#));
    }

    #[test]
    fn details_surface_embeds_markup_verbatim() {
        let mut scene = Scene::new(960.0, 600.0);
        scene.add(Element::new(
            LayerName::Details,
            Shape::ForeignObject {
                x: 0.0,
                y: 0.0,
                width: 960.0,
                height: 600.0,
                html: "<p>N/A</p>".to_string(),
            },
        ));
        let svg = render_svg(&scene, &ZoomTransform::IDENTITY);
        assert!(svg.contains("<foreignObject"));
        assert!(svg.contains("<p>N/A</p>"));
        assert!(svg.contains(XHTML_NS));
    }

    #[test]
    fn extra_groups_widen_the_document() {
        let scene = Scene::new(960.0, 600.0);
        let legend = SvgGroup {
            group: Group::new()
                .set("id", "legend")
                .set("transform", "translate(980,20)"),
            width: 200.0,
        };
        let svg = render_svg_with(&scene, &ZoomTransform::IDENTITY, &[legend]);
        assert!(svg.contains(r#"width="1160""#));
        assert!(svg.contains(r#"id="legend""#));
        assert!(svg.contains(r#"transform="translate(980,20)""#));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(5.0), "5");
        assert_eq!(num(12.3456), "12.346");
        assert_eq!(num(-0.0001), "0");
    }
}
