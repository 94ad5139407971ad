//! SVG path data generation through the map projection.
//!
//! Rings are closed; open lines are not. A ring or line with a vertex that
//! fails to project is dropped rather than drawn distorted.

use case_map_projection::ConicEqualArea;
use geo::{LineString, MultiLineString, MultiPolygon};
use svg::node::element::path::Data;

/// Appends one projected line string to `data` as a subpath. Returns `data`
/// unchanged if any vertex did not project.
fn add_line(data: Data, projection: &ConicEqualArea, line: &LineString<f64>, close: bool) -> Data {
    let Some(points) = line
        .coords()
        .map(|coord| projection.project(coord.x, coord.y))
        .collect::<Option<Vec<(f64, f64)>>>()
    else {
        return data;
    };
    let Some((first, rest)) = points.split_first() else {
        return data;
    };

    let mut data = data.move_to(*first);
    for point in rest {
        data = data.line_to(*point);
    }
    if close { data.close() } else { data }
}

/// Path data for a polygon set. Returns `None` when nothing projects.
#[must_use]
pub fn polygon_path(projection: &ConicEqualArea, geometry: &MultiPolygon<f64>) -> Option<Data> {
    let mut data = Data::new();
    for polygon in geometry {
        // Holes are kept as further subpaths.
        data = add_line(data, projection, polygon.exterior(), true);
        for interior in polygon.interiors() {
            data = add_line(data, projection, interior, true);
        }
    }
    (!data.is_empty()).then_some(data)
}

/// Path data for a line set. Returns `None` when nothing projects.
#[must_use]
pub fn line_path(projection: &ConicEqualArea, geometry: &MultiLineString<f64>) -> Option<Data> {
    let mut data = Data::new();
    for line in geometry {
        data = add_line(data, projection, line, false);
    }
    (!data.is_empty()).then_some(data)
}
