//! # Mesh Data Structure
//!
//! Indexed triangle mesh with optional per-face normals.

use config::constants::EPSILON;
use glam::{DMat4, DVec3};
use std::collections::HashMap;

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the STL and WASM boundaries.
///
/// Triangles wind counter-clockwise when seen from outside the solid.
///
/// # Example
///
/// ```rust
/// use draw_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional unit normal per triangle
    face_normals: Option<Vec<DVec3>>,
}

/// Unit normal of the triangle `a, b, c`, or zero when it is degenerate.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let normal = (b - a).cross(c - a);
    let len = normal.length();
    if len > EPSILON {
        normal / len
    } else {
        DVec3::ZERO
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            face_normals: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    ///
    /// Invalidates previously computed face normals.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
        self.face_normals = None;
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Corner positions of triangle `index`.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Computes and stores one unit normal per triangle.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn compute_face_normals(&mut self) {
        let normals = (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle_positions(i);
                face_normal(a, b, c)
            })
            .collect();
        self.face_normals = Some(normals);
    }

    /// Returns the stored face normals, if computed.
    pub fn face_normals(&self) -> Option<&[DVec3]> {
        self.face_normals.as_deref()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive for a closed mesh whose triangles face outward.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                self.vertex(a).dot(self.vertex(b).cross(self.vertex(c)))
            })
            .sum::<f64>()
            / 6.0
    }

    /// True when every directed edge is matched by its reverse, i.e. the
    /// surface is closed and consistently oriented.
    pub fn is_closed(&self) -> bool {
        let mut edges: HashMap<(u32, u32), i64> = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                *edges.entry((from, to)).or_default() += 1;
            }
        }
        edges
            .iter()
            .all(|(&(from, to), &count)| edges.get(&(to, from)) == Some(&count))
    }

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// A mirroring matrix (negative determinant) also reverses every
    /// triangle so faces keep pointing outward.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }

        if matrix.determinant() < 0.0 {
            for tri in &mut self.triangles {
                tri.swap(1, 2);
            }
        }

        if self.face_normals.is_some() {
            self.compute_face_normals();
        }
    }

    /// Merges another mesh into this one.
    ///
    /// Face normals are kept only when both meshes carry them.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );

        match (&mut self.face_normals, &other.face_normals) {
            (Some(own), Some(theirs)) => own.extend_from_slice(theirs),
            _ => self.face_normals = None,
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex index
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| i < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        })
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
