//! # Linear Extrusion
//!
//! Extrudes a 2D polygon with holes along the Z axis into a closed prism:
//! bottom cap at z = 0, top cap at z = depth, and side walls along the outer
//! ring and every hole.

use super::{triangulate, validate_polygon, Polygon2D};
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::{CURVE_SUBDIVISIONS, MAX_POLYGON_VERTICES};
use draw_trace::Shape;
use glam::DVec3;
use rayon::prelude::*;
use tracing::debug;

/// Parameters for shape extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeParams {
    /// Extrusion depth along Z
    pub depth: f64,
    /// Line pieces per flattened curve segment
    pub curve_subdivisions: u32,
    /// Maximum boundary vertices per shape
    pub max_vertices: usize,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            depth: 1.0,
            curve_subdivisions: CURVE_SUBDIVISIONS,
            max_vertices: MAX_POLYGON_VERTICES,
        }
    }
}

impl ExtrudeParams {
    /// Default parameters with the given depth.
    pub fn with_depth(depth: f64) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Extrudes a normalized polygon (outer counter-clockwise, holes clockwise).
///
/// # Arguments
///
/// * `polygon` - The 2D polygon to extrude
/// * `params` - Extrusion parameters
///
/// # Returns
///
/// A closed mesh with `2 * n` vertices, where `n` counts the boundary
/// vertices of all rings: the bottom ring first, then the top ring.
///
/// # Example
///
/// ```rust
/// use draw_mesh::ops::extrude::{extrude_polygon, ExtrudeParams, Polygon2D};
/// use glam::DVec2;
///
/// let square = Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(10.0));
/// let mesh = extrude_polygon(&square, &ExtrudeParams::with_depth(20.0)).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn extrude_polygon(polygon: &Polygon2D, params: &ExtrudeParams) -> MeshResult<Mesh> {
    if !(params.depth > 0.0 && params.depth.is_finite()) {
        return Err(MeshError::invalid_dimensions(format!(
            "extrusion depth must be positive, got {}",
            params.depth
        )));
    }

    let n = polygon.total_vertex_count();
    if n > params.max_vertices {
        return Err(MeshError::resource_limit(
            "polygon vertices",
            n,
            params.max_vertices,
        ));
    }
    if polygon.vertex_count() < 3 {
        return Err(MeshError::geometry(
            "polygon must have at least 3 vertices",
        ));
    }

    validate_polygon(polygon)?;
    let cap = triangulate(polygon)?;

    let ring_edges = n;
    let mut mesh = Mesh::with_capacity(2 * n, 2 * cap.len() + 2 * ring_edges);

    // Bottom ring, then top ring
    for z in [0.0, params.depth] {
        for p in polygon.rings().flatten() {
            mesh.add_vertex(DVec3::new(p.x, p.y, z));
        }
    }

    // Side walls: two triangles per ring edge
    let mut base = 0;
    for ring in polygon.rings() {
        let len = ring.len();
        for i in 0..len {
            let a0 = (base + i) as u32;
            let a1 = (base + (i + 1) % len) as u32;
            let b0 = a0 + n as u32;
            let b1 = a1 + n as u32;
            mesh.add_triangle(a0, a1, b1);
            mesh.add_triangle(a0, b1, b0);
        }
        base += len;
    }

    // Bottom cap faces -z, top cap faces +z
    for &[a, b, c] in &cap {
        mesh.add_triangle(a as u32, c as u32, b as u32);
    }
    let top = n as u32;
    for &[a, b, c] in &cap {
        mesh.add_triangle(top + a as u32, top + b as u32, top + c as u32);
    }

    Ok(mesh)
}

/// Flattens and extrudes one traced shape.
///
/// # Errors
///
/// - `InvalidDimensions` when the depth is not positive
/// - `Geometry` for degenerate, self-intersecting or badly nested contours,
///   or a triangulation that loses area
/// - `ResourceLimit` when the flattened outline exceeds `max_vertices`
pub fn extrude_shape(shape: &Shape, params: &ExtrudeParams) -> MeshResult<Mesh> {
    let polygon = Polygon2D::from_shape(shape, params.curve_subdivisions)?;
    extrude_polygon(&polygon, params)
}

/// Extrudes shapes in parallel and merges them in input order.
///
/// The first failing shape (in input order) aborts the whole batch.
pub fn extrude_shapes(shapes: &[Shape], params: &ExtrudeParams) -> MeshResult<Mesh> {
    let results: Vec<MeshResult<Mesh>> = shapes
        .par_iter()
        .map(|shape| extrude_shape(shape, params))
        .collect();
    let meshes = results.into_iter().collect::<MeshResult<Vec<_>>>()?;

    let mut merged = Mesh::with_capacity(
        meshes.iter().map(Mesh::vertex_count).sum(),
        meshes.iter().map(Mesh::triangle_count).sum(),
    );
    for mesh in &meshes {
        merged.merge(mesh);
    }
    debug!(
        shapes = shapes.len(),
        vertices = merged.vertex_count(),
        triangles = merged.triangle_count(),
        "Extruded shapes"
    );
    Ok(merged)
}
