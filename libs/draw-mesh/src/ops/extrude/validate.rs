//! Simplicity and containment checks for extrusion outlines.
//!
//! The checks themselves live in `draw_trace::geometry` so the tracer can
//! hold its fitted contours to the same rules; this module names the
//! violation.

use super::Polygon2D;
use crate::error::{MeshError, MeshResult};
use draw_trace::geometry::{find_ring_defect, RingDefect};

/// Checks that every ring is simple, rings do not touch or cross each other,
/// every hole lies inside the outer ring, and no hole lies inside another.
///
/// # Errors
///
/// `Geometry` naming the first violation found.
pub fn validate_polygon(polygon: &Polygon2D) -> MeshResult<()> {
    match find_ring_defect(&polygon.outer, &polygon.holes) {
        None => Ok(()),
        Some(defect) => Err(MeshError::geometry(describe(defect))),
    }
}

fn describe(defect: RingDefect) -> String {
    match defect {
        RingDefect::SelfIntersection { ring: 0 } => "outer contour intersects itself".to_string(),
        RingDefect::SelfIntersection { ring } => format!("hole {} intersects itself", ring - 1),
        RingDefect::Crossing { first: 0, second } => {
            format!("hole {} crosses the outer contour", second - 1)
        }
        RingDefect::Crossing { first, second } => {
            format!("holes {} and {} intersect", first - 1, second - 1)
        }
        RingDefect::Outside { hole } => format!("hole {hole} is not inside the outer contour"),
        RingDefect::Nested { hole, parent } => format!("hole {hole} lies inside hole {parent}"),
    }
}
