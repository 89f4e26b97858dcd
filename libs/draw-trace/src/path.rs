//! # Traced Paths
//!
//! Renderer-independent contour representation produced by the tracer.
//!
//! A [`Contour`] is a start point followed by segments. Each segment begins
//! where the previous one ended (the running cursor) and the last segment
//! returns to the start point.

use crate::raster::Rgba;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One piece of a contour, relative to the running cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Straight line from the cursor to `(x, y)`.
    Line { x: f64, y: f64 },
    /// Quadratic Bézier from the cursor to `(x, y)` with control `(cx, cy)`.
    QuadraticCurve { cx: f64, cy: f64, x: f64, y: f64 },
}

impl PathSegment {
    /// Creates a line segment ending at `end`.
    pub fn line(end: DVec2) -> Self {
        Self::Line { x: end.x, y: end.y }
    }

    /// Creates a quadratic segment with `control` ending at `end`.
    pub fn quadratic(control: DVec2, end: DVec2) -> Self {
        Self::QuadraticCurve {
            cx: control.x,
            cy: control.y,
            x: end.x,
            y: end.y,
        }
    }

    /// Where the cursor is after this segment.
    #[inline]
    pub fn end(&self) -> DVec2 {
        match *self {
            Self::Line { x, y } | Self::QuadraticCurve { x, y, .. } => DVec2::new(x, y),
        }
    }

    /// Point at parameter `t` in `[0, 1]` when starting from `from`.
    pub fn point_at(&self, from: DVec2, t: f64) -> DVec2 {
        match *self {
            Self::Line { x, y } => from.lerp(DVec2::new(x, y), t),
            Self::QuadraticCurve { cx, cy, x, y } => {
                quadratic_point(from, DVec2::new(cx, cy), DVec2::new(x, y), t)
            }
        }
    }
}

/// Evaluates a quadratic Bézier.
#[inline]
pub fn quadratic_point(p0: DVec2, control: DVec2, p2: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u) + control * (2.0 * u * t) + p2 * (t * t)
}

/// A closed boundary made of line and curve segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    start: DVec2,
    segments: Vec<PathSegment>,
}

impl Contour {
    /// Creates a contour from its start point and segments.
    pub fn new(start: DVec2, segments: Vec<PathSegment>) -> Self {
        Self { start, segments }
    }

    /// Creates a closed polyline through `points`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use draw_trace::Contour;
    /// use glam::DVec2;
    ///
    /// let tri = Contour::polygon(&[DVec2::ZERO, DVec2::X, DVec2::Y]);
    /// assert_eq!(tri.segments().len(), 3);
    /// assert_eq!(tri.flatten(4).len(), 3);
    /// ```
    pub fn polygon(points: &[DVec2]) -> Self {
        let Some(&start) = points.first() else {
            return Self::new(DVec2::ZERO, Vec::new());
        };
        let segments = points[1..]
            .iter()
            .chain(std::iter::once(&start))
            .map(|&p| PathSegment::line(p))
            .collect();
        Self::new(start, segments)
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True when the contour has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of quadratic segments.
    pub fn curve_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::QuadraticCurve { .. }))
            .count()
    }

    /// Flattens the contour into a closed polyline.
    ///
    /// Each curve becomes `subdivisions` straight pieces. Consecutive
    /// duplicate points and the closing point are dropped, so the result
    /// lists every corner exactly once.
    pub fn flatten(&self, subdivisions: u32) -> Vec<DVec2> {
        let steps = subdivisions.max(1);
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        points.push(self.start);
        let mut cursor = self.start;
        for segment in &self.segments {
            match segment {
                PathSegment::Line { .. } => points.push(segment.end()),
                PathSegment::QuadraticCurve { .. } => {
                    for i in 1..=steps {
                        let t = f64::from(i) / f64::from(steps);
                        points.push(segment.point_at(cursor, t));
                    }
                }
            }
            cursor = segment.end();
        }
        points.dedup();
        while points.len() > 1 && points.last() == points.first() {
            points.pop();
        }
        points
    }
}

/// One traced boundary of a palette layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedPath {
    pub contour: Contour,
    /// True when the path bounds a hole inside another path of its layer.
    pub is_hole: bool,
    /// Indices (within the same layer) of this path's holes.
    pub holes: Vec<usize>,
}

/// All paths traced for one palette color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedLayer {
    pub color: Rgba,
    pub paths: Vec<TracedPath>,
}

/// Tracer output: one layer per palette color, in palette order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<TracedLayer>,
}

impl TraceData {
    /// Total number of paths across all layers.
    pub fn path_count(&self) -> usize {
        self.layers.iter().map(|l| l.paths.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_end() {
        assert_eq!(PathSegment::line(DVec2::new(1.0, 2.0)).end(), DVec2::new(1.0, 2.0));
        let q = PathSegment::quadratic(DVec2::new(5.0, 5.0), DVec2::new(3.0, 4.0));
        assert_eq!(q.end(), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_quadratic_point_midpoint() {
        let p = quadratic_point(DVec2::ZERO, DVec2::new(1.0, 2.0), DVec2::new(2.0, 0.0), 0.5);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_flatten_polygon_drops_closing_point() {
        let square = Contour::polygon(&[
            DVec2::ZERO,
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ]);
        let points = square.flatten(8);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], DVec2::ZERO);
        assert_eq!(points[3], DVec2::new(0.0, 2.0));
    }

    #[test]
    fn test_flatten_subdivides_curves() {
        let contour = Contour::new(
            DVec2::ZERO,
            vec![
                PathSegment::quadratic(DVec2::new(1.0, 2.0), DVec2::new(2.0, 0.0)),
                PathSegment::line(DVec2::ZERO),
            ],
        );
        assert_eq!(contour.curve_count(), 1);
        // start + 4 curve samples, closing line returns to start
        let points = contour.flatten(4);
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[2].y, 1.0);
    }

    #[test]
    fn test_empty_contour() {
        let contour = Contour::polygon(&[]);
        assert!(contour.is_empty());
    }
}
