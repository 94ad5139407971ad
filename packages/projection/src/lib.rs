#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map projection for the case map.
//!
//! Implements an Albers-style conic equal-area projection with the same
//! parameterization as `d3.geoConicEqualArea` (parallels, rotation, center,
//! scale, translate) and the `fitSize`/`fitExtent` helpers that size the
//! projection to a geometry's projected bounds.

pub mod conic;
pub mod fit;

pub use conic::ConicEqualArea;

use thiserror::Error;

/// Errors that can occur while configuring a projection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// The geometry to fit has no projectable vertices.
    #[error("Cannot fit projection to a geometry with no projectable coordinates")]
    EmptyGeometry,

    /// The geometry's projected bounds have zero width and height, or the
    /// target extent is empty.
    #[error("Degenerate extent: {message}")]
    DegenerateExtent {
        /// Description of which extent collapsed.
        message: String,
    },
}
