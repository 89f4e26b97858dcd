//! Segment fitting for closed point loops.
//!
//! A run of points is replaced by one straight line when every interior point
//! lies within the line tolerance of the chord, otherwise by one quadratic
//! curve when a curve through the worst point stays within the curve
//! tolerance. Runs that fit neither are split at the worst point.
//!
//! A fitted outline must stay a simple ring with the loop's orientation;
//! [`fit_outline`] tightens the tolerances until it does.

use crate::geometry::{distance_to_segment, is_simple, signed_area};
use crate::path::{quadratic_point, Contour, PathSegment};
use config::constants::{approx_zero, CURVE_SUBDIVISIONS, MAX_REFIT_ATTEMPTS};
use glam::DVec2;

/// Fits a closed loop and checks the result, halving both tolerances up to
/// [`MAX_REFIT_ATTEMPTS`] times, then falling back to the unsimplified
/// loop.
///
/// Returns `None` when even the unsimplified loop is degenerate.
pub(crate) fn fit_outline(
    points: &[DVec2],
    line_tolerance: f64,
    curve_tolerance: f64,
) -> Option<Contour> {
    let area = signed_area(points);
    let (mut line, mut curve) = (line_tolerance, curve_tolerance);
    for _ in 0..MAX_REFIT_ATTEMPTS {
        let contour = fit_contour(points, line, curve);
        if is_valid_outline(&contour, area) {
            return Some(contour);
        }
        if line == 0.0 && curve == 0.0 {
            return None;
        }
        line /= 2.0;
        curve /= 2.0;
    }
    let exact = fit_contour(points, 0.0, 0.0);
    is_valid_outline(&exact, area).then_some(exact)
}

/// True when the flattened contour is a simple ring with at least three
/// points whose area has the sign of `loop_area`.
pub(crate) fn is_valid_outline(contour: &Contour, loop_area: f64) -> bool {
    let ring = contour.flatten(CURVE_SUBDIVISIONS);
    let area = signed_area(&ring);
    ring.len() >= 3
        && !approx_zero(area)
        && area.signum() == loop_area.signum()
        && is_simple(&ring)
}

/// Fits a closed loop of points with line and curve segments.
///
/// The contour starts at `points[0]` and its final segment returns there. A
/// `curve_tolerance` of zero disables curves.
pub(crate) fn fit_contour(points: &[DVec2], line_tolerance: f64, curve_tolerance: f64) -> Contour {
    let Some(&start) = points.first() else {
        return Contour::new(DVec2::ZERO, Vec::new());
    };

    // Close the run so the last index maps back to the start point
    let closed: Vec<DVec2> = points.iter().copied().chain(std::iter::once(start)).collect();

    let mut segments = Vec::new();
    // Ranges still to fit, popped in contour order
    let mut pending = vec![(0, closed.len() - 1)];
    while let Some((i, j)) = pending.pop() {
        if j <= i {
            continue;
        }
        if j == i + 1 {
            segments.push(PathSegment::line(closed[j]));
            continue;
        }

        let (worst, deviation) = worst_point(&closed, i, j);
        // A chord from a point back to itself always keeps its worst point
        if deviation < line_tolerance && closed[i] != closed[j] {
            segments.push(PathSegment::line(closed[j]));
            continue;
        }
        if curve_tolerance > 0.0 {
            if let Some(control) = fit_quadratic(&closed, i, j, worst, curve_tolerance) {
                segments.push(PathSegment::quadratic(control, closed[j]));
                continue;
            }
        }

        pending.push((worst, j));
        pending.push((i, worst));
    }

    Contour::new(start, segments)
}

/// Interior point of `i..=j` farthest from the chord, with its distance.
fn worst_point(points: &[DVec2], i: usize, j: usize) -> (usize, f64) {
    let (a, b) = (points[i], points[j]);
    let mut worst = i + 1;
    let mut deviation = f64::NEG_INFINITY;
    for k in i + 1..j {
        let d = distance_to_segment(points[k], a, b);
        if d > deviation {
            worst = k;
            deviation = d;
        }
    }
    (worst, deviation)
}

/// Control point of the quadratic through `points[i]`, `points[worst]` and
/// `points[j]`, if every point of the run stays within `tolerance`.
///
/// Points are parameterized by index.
fn fit_quadratic(
    points: &[DVec2],
    i: usize,
    j: usize,
    worst: usize,
    tolerance: f64,
) -> Option<DVec2> {
    let (p0, p2) = (points[i], points[j]);
    let span = (j - i) as f64;
    let t = (worst - i) as f64 / span;
    let u = 1.0 - t;
    let control = (points[worst] - p0 * (u * u) - p2 * (t * t)) / (2.0 * u * t);
    if !control.is_finite() {
        return None;
    }

    let fits = (i + 1..j).all(|k| {
        let t = (k - i) as f64 / span;
        quadratic_point(p0, control, p2, t).distance(points[k]) < tolerance
    });
    fits.then_some(control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::signed_area;
    use approx::assert_relative_eq;

    fn square_midpoints(size: usize) -> Vec<DVec2> {
        // Midpoints of the lattice edges around a size x size block
        let s = size as f64;
        let mut points = Vec::new();
        for x in 0..size {
            points.push(DVec2::new(x as f64 + 0.5, 0.0));
        }
        for y in 0..size {
            points.push(DVec2::new(s, y as f64 + 0.5));
        }
        for x in (0..size).rev() {
            points.push(DVec2::new(x as f64 + 0.5, s));
        }
        for y in (0..size).rev() {
            points.push(DVec2::new(0.0, y as f64 + 0.5));
        }
        points
    }

    #[test]
    fn test_block_fits_octagon_of_lines() {
        let points = square_midpoints(10);
        let contour = fit_contour(&points, 0.1, 0.1);
        assert_eq!(contour.curve_count(), 0);
        let outline = contour.flatten(8);
        assert_eq!(outline.len(), 8);
        assert_relative_eq!(signed_area(&outline), signed_area(&points));
    }

    #[test]
    fn test_contour_closes_on_start() {
        let points = square_midpoints(3);
        let contour = fit_contour(&points, 0.0, 0.0);
        assert_eq!(contour.start(), points[0]);
        assert_eq!(contour.segments().last().map(|s| s.end()), Some(points[0]));
    }

    #[test]
    fn test_zero_curve_tolerance_yields_lines_only() {
        let points: Vec<DVec2> = (0..32)
            .map(|k| {
                let a = k as f64 / 32.0 * std::f64::consts::TAU;
                DVec2::new(a.cos(), a.sin()) * 10.0
            })
            .collect();
        let contour = fit_contour(&points, 0.1, 0.0);
        assert_eq!(contour.curve_count(), 0);
        for p in contour.flatten(1) {
            assert_relative_eq!(p.length(), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parabola_fits_one_curve() {
        let mut points: Vec<DVec2> = (0..=8)
            .map(|k| {
                let x = k as f64;
                DVec2::new(x, (x - 4.0) * (x - 4.0) / 4.0)
            })
            .collect();
        // Close along the top so the loop has a straight return
        points.push(DVec2::new(4.0, 4.0));
        let contour = fit_contour(&points, 0.01, 0.01);
        assert!(contour.curve_count() >= 1);
    }

    fn diamond() -> Vec<DVec2> {
        // Edge midpoints around a single pixel
        vec![
            DVec2::new(0.5, 0.0),
            DVec2::new(1.0, 0.5),
            DVec2::new(0.5, 1.0),
            DVec2::new(0.0, 0.5),
        ]
    }

    #[test]
    fn test_loose_tolerance_keeps_single_pixel_outline() {
        let points = diamond();
        for tolerance in [0.6, 1.0, 5.0] {
            let contour = fit_outline(&points, tolerance, tolerance).unwrap();
            let ring = contour.flatten(CURVE_SUBDIVISIONS);
            assert!(ring.len() >= 3, "tolerance {tolerance}");
            assert!(signed_area(&ring) > 0.0, "tolerance {tolerance}");
            assert!(is_simple(&ring), "tolerance {tolerance}");
        }
    }

    #[test]
    fn test_lines_only_keep_three_points() {
        let contour = fit_outline(&diamond(), 1.0, 0.0).unwrap();
        assert_eq!(contour.curve_count(), 0);
        assert!(contour.flatten(1).len() >= 3);
    }

    #[test]
    fn test_self_crossing_fit_is_refitted() {
        // Thin zigzag strip; loose fits cut across the notches
        let mut points = Vec::new();
        for k in 0..6 {
            let x = k as f64 * 2.0;
            points.push(DVec2::new(x, 0.0));
            points.push(DVec2::new(x + 1.0, 0.9));
        }
        for k in (0..6).rev() {
            let x = k as f64 * 2.0;
            points.push(DVec2::new(x + 1.0, 1.1));
            points.push(DVec2::new(x, 2.0));
        }
        let area = signed_area(&points);
        let contour = fit_outline(&points, 3.0, 3.0).unwrap();
        assert!(is_valid_outline(&contour, area));
    }

    #[test]
    fn test_degenerate_loop_is_rejected() {
        let line = [DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)];
        assert!(fit_outline(&line, 0.1, 0.1).is_none());
    }

    #[test]
    fn test_empty_points() {
        assert!(fit_contour(&[], 0.1, 0.1).is_empty());
    }
}
