#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Layer rendering for the case map.
//!
//! Rendered output is held in a [`scene::Scene`]: an arena of elements
//! grouped into fixed, stacked layers (basemap, streets, outline, cases,
//! tooltip, details). Each layer keeps its own draw order, which the
//! interaction layer reorders with [`scene::bring_to_front`]. Domain
//! records never hold element handles; [`layers`] returns index maps from
//! region and case ids to [`scene::ElementId`]s instead.

pub mod color;
pub mod layers;
pub mod path;
pub mod scene;
pub mod svg;
pub mod view;
pub mod zoom;

pub use scene::{ElementClass, ElementId, LayerName, Scene, bring_to_front};
pub use view::MapView;
pub use zoom::ZoomTransform;
