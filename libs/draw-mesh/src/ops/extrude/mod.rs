//! # Shape Extrusion
//!
//! Turns traced shapes into closed prisms:
//! - **Polygon2D**: flattened, orientation-normalized outline with holes
//! - **validate**: simplicity and containment checks on the outline
//! - **triangulate**: cap tessellation with hole bridging
//! - **extrude_shape / extrude_shapes**: cap + side wall assembly
//!
//! Coordinates stay in the shape's own frame; the model assembler places
//! the result.

mod linear;
mod triangulate;
mod validate;

#[cfg(test)]
mod tests;

pub use linear::{extrude_polygon, extrude_shape, extrude_shapes, ExtrudeParams};
pub use triangulate::triangulate;
pub use validate::validate_polygon;

use crate::error::{MeshError, MeshResult};
use config::constants::approx_zero;
use draw_trace::geometry::signed_area;
use draw_trace::{Contour, Shape};
use glam::DVec2;

/// A 2D polygon for extrusion operations.
///
/// Represents a closed 2D shape that can be extruded into 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Outer boundary vertices in counter-clockwise order
    pub outer: Vec<DVec2>,
    /// Holes, each in clockwise order
    pub holes: Vec<Vec<DVec2>>,
}

impl Polygon2D {
    /// Creates a new polygon from outer boundary vertices.
    ///
    /// # Arguments
    ///
    /// * `outer` - Vertices in counter-clockwise order
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    ///
    /// # Arguments
    ///
    /// * `outer` - Outer boundary in counter-clockwise order
    /// * `holes` - Inner holes, each in clockwise order
    pub fn with_holes(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>) -> Self {
        Self { outer, holes }
    }

    /// Creates an axis-aligned rectangle with its minimum corner at `origin`.
    pub fn rectangle(origin: DVec2, size: DVec2) -> Self {
        Self::new(vec![
            origin,
            origin + DVec2::new(size.x, 0.0),
            origin + size,
            origin + DVec2::new(0.0, size.y),
        ])
    }

    /// Flattens a traced shape and normalizes its ring orientation.
    ///
    /// Curves become `subdivisions` line pieces each.
    ///
    /// # Errors
    ///
    /// `Geometry` when a ring has fewer than three distinct points or no
    /// area.
    ///
    /// # Example
    ///
    /// ```rust
    /// use draw_mesh::ops::extrude::Polygon2D;
    /// use draw_trace::{Contour, Shape};
    /// use glam::DVec2;
    ///
    /// // Clockwise input comes out counter-clockwise
    /// let outline = Contour::polygon(&[DVec2::ZERO, DVec2::Y, DVec2::ONE, DVec2::X]);
    /// let polygon = Polygon2D::from_shape(&Shape::new(outline), 8).unwrap();
    /// assert_eq!(polygon.outer, vec![DVec2::X, DVec2::ONE, DVec2::Y, DVec2::ZERO]);
    /// ```
    pub fn from_shape(shape: &Shape, subdivisions: u32) -> MeshResult<Self> {
        let outer = ring_from_contour(&shape.outer, subdivisions, true, "outer contour")?;
        let holes = shape
            .holes
            .iter()
            .map(|hole| ring_from_contour(hole, subdivisions, false, "hole contour"))
            .collect::<MeshResult<Vec<_>>>()?;
        Ok(Self { outer, holes })
    }

    /// Number of outer boundary vertices.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Number of boundary vertices across the outer ring and all holes.
    pub fn total_vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Enclosed area: outer area minus hole areas.
    pub fn area(&self) -> f64 {
        signed_area(&self.outer).abs()
            - self
                .holes
                .iter()
                .map(|h| signed_area(h).abs())
                .sum::<f64>()
    }

    /// All rings, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &[DVec2]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// Flattens one contour into a ring with the requested orientation.
fn ring_from_contour(
    contour: &Contour,
    subdivisions: u32,
    counter_clockwise: bool,
    what: &str,
) -> MeshResult<Vec<DVec2>> {
    let mut ring = contour.flatten(subdivisions);
    if ring.len() < 3 {
        return Err(MeshError::geometry(format!(
            "{what} has {} distinct points, at least 3 are required",
            ring.len()
        )));
    }

    let area = signed_area(&ring);
    if approx_zero(area) || !area.is_finite() {
        return Err(MeshError::geometry(format!("{what} encloses no area")));
    }
    if (area > 0.0) != counter_clockwise {
        ring.reverse();
    }
    Ok(ring)
}
