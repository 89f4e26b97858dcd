//! # Polygon Helpers
//!
//! Small planar predicates shared by the tracer and the extruder.

use glam::DVec2;
use robust::{orient2d, Coord};

/// Shoelace signed area of a closed polygon (closing edge implied).
///
/// Positive for counter-clockwise order in a y-up frame, which is clockwise
/// on screen when y points down.
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    let mut prev = points[points.len() - 1];
    for &p in points {
        twice += prev.perp_dot(p);
        prev = p;
    }
    twice * 0.5
}

/// Even-odd point-in-polygon test.
///
/// Points exactly on an edge may report either side.
///
/// # Example
///
/// ```rust
/// use draw_trace::geometry::point_in_polygon;
/// use glam::DVec2;
///
/// let square = [DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(2.0, 2.0), DVec2::new(0.0, 2.0)];
/// assert!(point_in_polygon(DVec2::ONE, &square));
/// assert!(!point_in_polygon(DVec2::new(3.0, 1.0), &square));
/// ```
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of a point set as `(min, max)`.
///
/// Returns `(ZERO, ZERO)` for an empty set.
pub fn bounds(points: &[DVec2]) -> (DVec2, DVec2) {
    let Some(&first) = points.first() else {
        return (DVec2::ZERO, DVec2::ZERO);
    };
    points[1..]
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)))
}

/// Distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Exact orientation of `c` relative to the directed line `a -> b`:
/// positive when counter-clockwise, zero when collinear.
#[inline]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// True when `p`, known to be collinear with `a..b`, lies within its bounds.
#[inline]
fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// True when the closed segments `p1..p2` and `q1..q2` share any point.
pub fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// First problem found in an outer ring and its holes.
///
/// Ring 0 is the outer ring; ring `h + 1` is hole `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingDefect {
    /// A ring touches or crosses itself
    SelfIntersection { ring: usize },
    /// Two different rings touch or cross
    Crossing { first: usize, second: usize },
    /// A hole lies outside the outer ring
    Outside { hole: usize },
    /// A hole lies inside another hole
    Nested { hole: usize, parent: usize },
}

/// One ring edge, tagged with its ring and position in the ring.
#[derive(Debug, Clone, Copy)]
struct Edge {
    ring: usize,
    index: usize,
    a: DVec2,
    b: DVec2,
}

impl Edge {
    #[inline]
    fn min_x(&self) -> f64 {
        self.a.x.min(self.b.x)
    }

    #[inline]
    fn max_x(&self) -> f64 {
        self.a.x.max(self.b.x)
    }

    #[inline]
    fn overlaps_y(&self, other: &Edge) -> bool {
        self.a.y.min(self.b.y) <= other.a.y.max(other.b.y)
            && other.a.y.min(other.b.y) <= self.a.y.max(self.b.y)
    }
}

/// Consecutive edges `first` then `second` share `first.b`; they conflict
/// only when the path doubles back along itself.
fn folds_back(first: &Edge, second: &Edge) -> bool {
    orient(first.a, first.b, second.b) == 0.0
        && (first.b - first.a).dot(second.b - second.a) < 0.0
}

/// Checks that every ring is simple, no two rings touch, every hole lies
/// inside `outer` and no hole lies inside another.
///
/// Edge pairs are found with a sweep along x; intersection tests are exact.
pub fn find_ring_defect(outer: &[DVec2], holes: &[Vec<DVec2>]) -> Option<RingDefect> {
    let rings: Vec<&[DVec2]> = std::iter::once(outer)
        .chain(holes.iter().map(Vec::as_slice))
        .collect();
    let mut edges: Vec<Edge> = rings
        .iter()
        .enumerate()
        .flat_map(|(ring, points)| {
            (0..points.len()).map(move |index| Edge {
                ring,
                index,
                a: points[index],
                b: points[(index + 1) % points.len()],
            })
        })
        .collect();
    edges.sort_by(|l, r| l.min_x().total_cmp(&r.min_x()));

    for (i, edge) in edges.iter().enumerate() {
        for other in &edges[i + 1..] {
            if other.min_x() > edge.max_x() {
                break;
            }
            if !edge.overlaps_y(other) {
                continue;
            }
            if edge.ring != other.ring {
                if segments_intersect(edge.a, edge.b, other.a, other.b) {
                    return Some(RingDefect::Crossing {
                        first: edge.ring.min(other.ring),
                        second: edge.ring.max(other.ring),
                    });
                }
                continue;
            }
            let n = rings[edge.ring].len();
            let conflict = if (edge.index + 1) % n == other.index {
                folds_back(edge, other)
            } else if (other.index + 1) % n == edge.index {
                folds_back(other, edge)
            } else {
                segments_intersect(edge.a, edge.b, other.a, other.b)
            };
            if conflict {
                return Some(RingDefect::SelfIntersection { ring: edge.ring });
            }
        }
    }

    for (h, hole) in holes.iter().enumerate() {
        let Some(&probe) = hole.first() else {
            return Some(RingDefect::Outside { hole: h });
        };
        if !point_in_polygon(probe, outer) {
            return Some(RingDefect::Outside { hole: h });
        }
        if let Some(parent) = holes
            .iter()
            .enumerate()
            .position(|(other, ring)| other != h && point_in_polygon(probe, ring))
        {
            return Some(RingDefect::Nested { hole: h, parent });
        }
    }

    None
}

/// True when `ring` has at least three points and does not touch itself.
///
/// # Example
///
/// ```rust
/// use draw_trace::geometry::is_simple;
/// use glam::DVec2;
///
/// let bow_tie = [DVec2::ZERO, DVec2::new(2.0, 2.0), DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)];
/// assert!(!is_simple(&bow_tie));
/// ```
pub fn is_simple(ring: &[DVec2]) -> bool {
    ring.len() >= 3 && find_ring_defect(ring, &[]).is_none()
}
