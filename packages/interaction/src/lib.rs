#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pointer hover, legend filtering, and page export for the case map.
//!
//! All interaction runs through an [`InteractionController`] that owns the
//! loaded [`AppState`]. Handlers take region and case ids rather than
//! element handles; the render layer's index maps resolve them.

pub mod controller;
pub mod detail;
pub mod filter;
pub mod legend;
pub mod page;
pub mod state;
pub mod transition;

pub use controller::{InteractionController, Layout, Point};
pub use filter::FilterPolicy;
pub use legend::Legend;
pub use state::AppState;
