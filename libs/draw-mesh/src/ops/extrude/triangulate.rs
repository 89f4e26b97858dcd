//! Cap triangulation with hole bridging via `earcutr`.

use super::Polygon2D;
use crate::error::{MeshError, MeshResult};
use config::constants::AREA_TOLERANCE;
use glam::DVec2;
use std::collections::HashMap;
use tracing::warn;

/// Triangulates `polygon` (outer minus holes, even-odd).
///
/// Indices address the rings concatenated in order: outer first, then each
/// hole. Every triangle is returned counter-clockwise. When the rings are
/// normalized (outer counter-clockwise, holes clockwise) every ring edge is
/// also a triangle edge, so caps meet extruded side walls without gaps.
///
/// # Errors
///
/// `Geometry` when the tessellation fails or its total area differs from
/// the polygon area by more than [`AREA_TOLERANCE`] (relative).
///
/// # Example
///
/// ```rust
/// use draw_mesh::ops::extrude::{triangulate, Polygon2D};
/// use glam::DVec2;
///
/// let square = Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(2.0));
/// assert_eq!(triangulate(&square).unwrap().len(), 2);
/// ```
pub fn triangulate(polygon: &Polygon2D) -> MeshResult<Vec<[usize; 3]>> {
    let points: Vec<DVec2> = polygon.rings().flatten().copied().collect();
    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();

    let mut hole_indices = Vec::with_capacity(polygon.holes.len());
    let mut offset = polygon.outer.len();
    for hole in &polygon.holes {
        hole_indices.push(offset);
        offset += hole.len();
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|err| MeshError::geometry(format!("triangulation failed: {err:?}")))?;

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    let mut covered = 0.0;
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (points[tri[0]], points[tri[1]], points[tri[2]]);
        let twice = (b - a).perp_dot(c - a);
        covered += twice.abs() * 0.5;
        if twice < 0.0 {
            triangles.push([tri[0], tri[2], tri[1]]);
        } else {
            triangles.push([tri[0], tri[1], tri[2]]);
        }
    }
    restore_collinear_vertices(polygon, &mut triangles);

    let expected = polygon.area();
    if (covered - expected).abs() > AREA_TOLERANCE * expected.abs().max(1.0) {
        warn!(expected, covered, "Triangulation does not cover the polygon");
        return Err(MeshError::geometry(format!(
            "triangulation covers area {covered}, polygon area is {expected}"
        )));
    }

    Ok(triangles)
}

/// Re-inserts ring vertices the triangulator dropped as collinear.
///
/// A dropped vertex leaves a triangle edge spanning several ring edges;
/// that triangle is split into a fan from its apex over the skipped run.
fn restore_collinear_vertices(polygon: &Polygon2D, triangles: &mut Vec<[usize; 3]>) {
    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len() * 3);
    for (t, &[a, b, c]) in triangles.iter().enumerate() {
        for edge in [(a, b), (b, c), (c, a)] {
            owner.insert(edge, t);
        }
    }

    let mut offset = 0;
    for ring in polygon.rings() {
        let n = ring.len();
        let at = |i: usize| offset + i % n;
        let mut i = 0;
        while i < n {
            let start = at(i);
            if owner.contains_key(&(start, at(i + 1))) {
                i += 1;
                continue;
            }
            let Some(skip) = (2..n).find(|&s| owner.contains_key(&(start, at(i + s)))) else {
                i += 1;
                continue;
            };
            let end = at(i + skip);
            let Some(t) = owner.remove(&(start, end)) else {
                i += 1;
                continue;
            };
            let apex = triangles[t]
                .into_iter()
                .find(|&v| v != start && v != end)
                .unwrap_or(start);

            let chain: Vec<usize> = (0..=skip).map(|s| at(i + s)).collect();
            for (k, pair) in chain.windows(2).enumerate() {
                let tri = [pair[0], pair[1], apex];
                let index = if k == 0 {
                    triangles[t] = tri;
                    t
                } else {
                    triangles.push(tri);
                    triangles.len() - 1
                };
                for edge in [(pair[0], pair[1]), (pair[1], apex), (apex, pair[0])] {
                    owner.insert(edge, index);
                }
            }
            i += skip;
        }
        offset += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn area_of(points: &[DVec2], triangles: &[[usize; 3]]) -> f64 {
        triangles
            .iter()
            .map(|t| {
                let twice = (points[t[1]] - points[t[0]]).perp_dot(points[t[2]] - points[t[0]]);
                assert!(twice > 0.0, "triangle {t:?} is not counter-clockwise");
                twice * 0.5
            })
            .sum()
    }

    #[test]
    fn test_square_with_hole() {
        let outer = Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(10.0)).outer;
        let mut hole = Polygon2D::rectangle(DVec2::splat(3.0), DVec2::splat(4.0)).outer;
        hole.reverse();
        let polygon = Polygon2D::with_holes(outer, vec![hole]);

        let triangles = triangulate(&polygon).unwrap();
        let points: Vec<DVec2> = polygon.rings().flatten().copied().collect();
        assert_relative_eq!(area_of(&points, &triangles), 84.0);
    }

    #[test]
    fn test_concave_polygon() {
        // L shape
        let polygon = Polygon2D::new(vec![
            DVec2::ZERO,
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 4.0),
            DVec2::new(0.0, 4.0),
        ]);
        let triangles = triangulate(&polygon).unwrap();
        assert_eq!(triangles.len(), 4);
        assert_relative_eq!(area_of(&polygon.outer, &triangles), 7.0);
    }

    #[test]
    fn test_collinear_vertices_stay_on_cap_boundary() {
        // Rectangle with extra points along its bottom edge
        let polygon = Polygon2D::new(vec![
            DVec2::ZERO,
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.0, 2.0),
            DVec2::new(0.0, 2.0),
        ]);
        let triangles = triangulate(&polygon).unwrap();
        assert_eq!(triangles.len(), 4);
        for i in 0..polygon.outer.len() {
            let edge = (i, (i + 1) % polygon.outer.len());
            assert!(
                triangles
                    .iter()
                    .any(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])].contains(&edge)),
                "ring edge {edge:?} missing from cap"
            );
        }
        assert_relative_eq!(area_of(&polygon.outer, &triangles), 6.0);
    }

    #[test]
    fn test_clockwise_input_still_yields_ccw_triangles() {
        let mut outer = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(3.0, 2.0)).outer;
        outer.reverse();
        let polygon = Polygon2D::new(outer);
        let triangles = triangulate(&polygon).unwrap();
        assert_relative_eq!(area_of(&polygon.outer, &triangles), 6.0);
    }
}
