//! # Frame Primitive
//!
//! Generates the rectangular picture frame the drawing sits in.
//!
//! ```text
//!   z = bd  ┌──┐              ┌──┐   border (outer 0-3 / 4-7)
//!           │  │              │  │
//!   z = d   │  └──────────────┘  │   inner floor (8-11 / 12-15)
//!   z = 0   └────────────────────┘
//! ```
//!
//! The floor at `d` may sit below the border (a recess) or above it (a
//! raised plinth); the same faces stay outward in both cases.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Triangles of the frame, counter-clockwise seen from outside.
const FRAME_TRIANGLES: [[u32; 3]; 28] = [
    // Border top between the outer rectangle and the inner rim at z = bd
    [4, 13, 12],
    [4, 5, 13],
    [5, 14, 13],
    [5, 6, 14],
    [6, 15, 14],
    [6, 7, 15],
    [7, 12, 15],
    [7, 4, 12],
    // Outer bottom
    [0, 3, 2],
    [0, 2, 1],
    // Outer side walls
    [0, 5, 4],
    [0, 1, 5],
    [1, 6, 5],
    [1, 2, 6],
    [2, 7, 6],
    [2, 3, 7],
    [3, 4, 7],
    [3, 0, 4],
    // Inner floor at z = d
    [8, 10, 11],
    [8, 9, 10],
    // Inner recess walls
    [8, 12, 13],
    [8, 13, 9],
    [9, 13, 14],
    [9, 14, 10],
    [10, 14, 15],
    [10, 15, 11],
    [11, 15, 12],
    [11, 12, 8],
];

/// Creates the frame mesh with its minimum corner at the origin.
///
/// # Arguments
///
/// * `width`, `height` - Outer size of the frame
/// * `depth` - Height of the inner floor
/// * `border_width` - Width of the border around the floor
/// * `border_depth` - Height of the border
///
/// # Returns
///
/// A closed mesh with 16 vertices and 28 triangles, with face normals
/// computed.
///
/// # Errors
///
/// `InvalidDimensions` unless every argument is positive and the border
/// leaves a floor: `2 * border_width < min(width, height)`.
///
/// # Example
///
/// ```rust
/// use draw_mesh::primitives::build_frame;
///
/// let frame = build_frame(100.0, 80.0, 5.0, 2.0, 2.0).unwrap();
/// assert_eq!(frame.vertex_count(), 16);
/// assert_eq!(frame.triangle_count(), 28);
/// ```
pub fn build_frame(
    width: f64,
    height: f64,
    depth: f64,
    border_width: f64,
    border_depth: f64,
) -> MeshResult<Mesh> {
    for (name, value) in [
        ("width", width),
        ("height", height),
        ("depth", depth),
        ("border width", border_width),
        ("border depth", border_depth),
    ] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(MeshError::invalid_dimensions(format!(
                "frame {name} must be positive, got {value}"
            )));
        }
    }
    if 2.0 * border_width >= width.min(height) {
        return Err(MeshError::invalid_dimensions(format!(
            "frame border width {border_width} leaves no floor in a {width}x{height} frame"
        )));
    }

    let (w, h, bw) = (width, height, border_width);
    let mut mesh = Mesh::with_capacity(16, FRAME_TRIANGLES.len());

    for z in [0.0, border_depth] {
        for (x, y) in [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)] {
            mesh.add_vertex(DVec3::new(x, y, z));
        }
    }
    for z in [depth, border_depth] {
        for (x, y) in [(bw, bw), (w - bw, bw), (w - bw, h - bw), (bw, h - bw)] {
            mesh.add_vertex(DVec3::new(x, y, z));
        }
    }

    for [a, b, c] in FRAME_TRIANGLES {
        mesh.add_triangle(a, b, c);
    }
    mesh.compute_face_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_counts_and_indices() {
        let mesh = build_frame(100.0, 100.0, 5.0, 2.0, 2.0).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 28);
        assert!(mesh.validate());
        assert_eq!(mesh.face_normals().map(<[DVec3]>::len), Some(28));
    }

    #[test]
    fn test_frame_closed_with_positive_volume() {
        // Floor above the border (plinth) and below it (recess)
        for (depth, border_depth) in [(5.0, 2.0), (2.0, 5.0), (3.0, 3.0)] {
            let mesh = build_frame(40.0, 30.0, depth, 4.0, border_depth).unwrap();
            assert!(mesh.is_closed());
            let expected = 40.0 * 30.0 * border_depth + 32.0 * 22.0 * (depth - border_depth);
            assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-9);
            assert!(mesh.signed_volume() > 0.0);
        }
    }

    #[test]
    fn test_frame_bottom_faces_down() {
        let mesh = build_frame(10.0, 10.0, 1.0, 1.0, 2.0).unwrap();
        let normals = mesh.face_normals().unwrap();
        assert_eq!(normals[8], DVec3::NEG_Z);
        assert_eq!(normals[9], DVec3::NEG_Z);
        // Inner floor faces up
        assert_eq!(normals[18], DVec3::Z);
    }

    #[test]
    fn test_frame_bounding_box() {
        let mesh = build_frame(60.0, 40.0, 5.0, 2.0, 8.0).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(60.0, 40.0, 8.0));
    }

    #[test]
    fn test_frame_rejects_invalid_dimensions() {
        assert!(build_frame(0.0, 10.0, 1.0, 1.0, 1.0).is_err());
        assert!(build_frame(10.0, 10.0, -1.0, 1.0, 1.0).is_err());
        assert!(build_frame(10.0, 10.0, 1.0, 0.0, 1.0).is_err());
        assert!(build_frame(10.0, 10.0, 1.0, 1.0, 0.0).is_err());
        // Border eats the whole floor
        assert!(build_frame(10.0, 4.0, 1.0, 2.0, 1.0).is_err());
        assert!(build_frame(10.0, 10.0, 1.0, 4.9, 1.0).is_ok());
    }
}
