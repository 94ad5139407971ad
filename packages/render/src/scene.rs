//! Element arena and per-layer draw order.
//!
//! Elements are addressed by [`ElementId`], an index into the arena.
//! Layers stack in [`LayerName::ALL`] order; within a layer, elements later
//! in the draw order paint over earlier ones.

use std::collections::BTreeSet;

use strum_macros::{AsRefStr, Display, EnumString};
use svg::node::element::path::Data;

/// Handle to an element in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

/// The stacked layers of the map, back to front.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum LayerName {
    Basemap,
    Streets,
    Outline,
    Cases,
    Tooltip,
    Details,
}

impl LayerName {
    /// Every layer, back to front.
    pub const ALL: [Self; 6] = [
        Self::Basemap,
        Self::Streets,
        Self::Outline,
        Self::Cases,
        Self::Tooltip,
        Self::Details,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// CSS classes an element can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ElementClass {
    /// Neighborhood fill
    Land,
    /// Neighborhood outline used for highlighting
    Neighborhood,
    Street,
    /// Case marker
    Symbol,
    /// Hover highlight
    Active,
    /// Filtered out by the legend; drawn fully transparent
    Hidden,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Geometry of an element.
#[derive(Debug, Clone)]
pub enum Shape {
    Path { d: Data },
    Circle { cx: f64, cy: f64, r: f64 },
    Text {
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        anchor: TextAnchor,
        text: String,
    },
    /// Embedded HTML content.
    ForeignObject {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        html: String,
    },
}

/// A rendered element.
#[derive(Debug, Clone)]
pub struct Element {
    pub layer: LayerName,
    pub shape: Shape,
    pub classes: BTreeSet<ElementClass>,
    pub fill: Option<String>,
    /// `visibility: hidden` when `false`. The element stays in the scene.
    pub visible: bool,
}

impl Element {
    #[must_use]
    pub fn new(layer: LayerName, shape: Shape) -> Self {
        Self {
            layer,
            shape,
            classes: BTreeSet::new(),
            fill: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: ElementClass) -> Self {
        self.classes.insert(class);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: ElementClass) -> bool {
        self.classes.contains(&class)
    }

    /// Rendered opacity. Hidden-class elements are fully transparent.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        if self.has_class(ElementClass::Hidden) {
            0.0
        } else {
            1.0
        }
    }
}

/// All rendered elements of a map.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    elements: Vec<Element>,
    order: [Vec<ElementId>; 6],
}

impl Scene {
    /// Creates an empty scene of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            order: Default::default(),
        }
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Appends `element` to the top of its layer.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        self.order[element.layer.index()].push(id);
        self.elements.push(element);
        id
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Number of elements in all layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements of `layer`, back to front.
    #[must_use]
    pub fn draw_order(&self, layer: LayerName) -> &[ElementId] {
        &self.order[layer.index()]
    }

    /// Position of `id` in its layer's draw order.
    #[must_use]
    pub fn z_index(&self, id: ElementId) -> Option<usize> {
        let layer = self.get(id)?.layer;
        self.draw_order(layer).iter().position(|e| *e == id)
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: ElementClass) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    /// Adds or removes `class` on `id`. Unknown ids are ignored.
    pub fn set_class(&mut self, id: ElementId, class: ElementClass, on: bool) {
        if let Some(element) = self.get_mut(id) {
            if on {
                element.classes.insert(class);
            } else {
                element.classes.remove(&class);
            }
        }
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.get_mut(id) {
            element.visible = visible;
        }
    }

    /// Iterates every element in paint order: layers back to front, then
    /// each layer's draw order.
    pub fn paint_order(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        LayerName::ALL.into_iter().flat_map(move |layer| {
            self.draw_order(layer)
                .iter()
                .map(move |id| (*id, &self.elements[id.0]))
        })
    }
}

/// Moves `id` to the top of its layer's draw order.
pub fn bring_to_front(scene: &mut Scene, id: ElementId) {
    let Some(layer) = scene.get(id).map(|e| e.layer) else {
        return;
    };
    let order = &mut scene.order[layer.index()];
    if let Some(pos) = order.iter().position(|e| *e == id) {
        order.remove(pos);
        order.push(id);
    }
}
