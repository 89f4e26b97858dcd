//! # Extrusion Integration Tests
//!
//! Tests for shape flattening, validation and extrusion.

use super::*;
use crate::error::ErrorKind;
use approx::assert_relative_eq;
use draw_trace::{Contour, PathSegment, Shape};
use glam::{DVec2, DVec3};

fn square_contour(origin: DVec2, size: f64) -> Contour {
    Contour::polygon(&[
        origin,
        origin + DVec2::new(size, 0.0),
        origin + DVec2::new(size, size),
        origin + DVec2::new(0.0, size),
    ])
}

#[test]
fn test_polygon2d_rectangle() {
    let rect = Polygon2D::rectangle(DVec2::new(1.0, 2.0), DVec2::new(10.0, 20.0));
    assert_eq!(rect.vertex_count(), 4);
    assert!(rect.holes.is_empty());
    assert_eq!(rect.outer[0], DVec2::new(1.0, 2.0));
    assert_eq!(rect.outer[2], DVec2::new(11.0, 22.0));
    assert_relative_eq!(rect.area(), 200.0);
}

#[test]
fn test_rectangle_extrusion_counts() {
    let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(4.0, 3.0));
    let mesh = extrude_polygon(&rect, &ExtrudeParams::with_depth(2.0)).unwrap();

    assert_eq!(mesh.vertex_count(), 2 * 4);
    // 2 per contour edge for the walls, 2 per cap
    assert_eq!(mesh.triangle_count(), 2 * 4 + 2 * 2);
    assert!(mesh.validate());
    assert!(mesh.is_closed());
    assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-9);

    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::ZERO);
    assert_eq!(max, DVec3::new(4.0, 3.0, 2.0));
}

#[test]
fn test_shape_with_hole_is_closed() {
    let shape = Shape::new(square_contour(DVec2::ZERO, 10.0))
        .with_hole(square_contour(DVec2::splat(3.0), 4.0));
    let mesh = extrude_shape(&shape, &ExtrudeParams::with_depth(1.0)).unwrap();

    assert_eq!(mesh.vertex_count(), 16);
    assert!(mesh.is_closed());
    assert_relative_eq!(mesh.signed_volume(), 84.0, epsilon = 1e-9);
}

#[test]
fn test_clockwise_outer_is_normalized() {
    // Raster-space contours come in either orientation
    let mut points = vec![
        DVec2::ZERO,
        DVec2::new(5.0, 0.0),
        DVec2::new(5.0, 5.0),
        DVec2::new(0.0, 5.0),
    ];
    points.reverse();
    let shape = Shape::new(Contour::polygon(&points));
    let mesh = extrude_shape(&shape, &ExtrudeParams::with_depth(3.0)).unwrap();
    assert_relative_eq!(mesh.signed_volume(), 75.0, epsilon = 1e-9);
}

#[test]
fn test_curves_are_flattened() {
    let contour = Contour::new(
        DVec2::ZERO,
        vec![
            PathSegment::line(DVec2::new(4.0, 0.0)),
            PathSegment::quadratic(DVec2::new(2.0, 4.0), DVec2::ZERO),
        ],
    );
    let params = ExtrudeParams {
        depth: 1.0,
        curve_subdivisions: 8,
        ..ExtrudeParams::default()
    };
    let mesh = extrude_shape(&Shape::new(contour), &params).unwrap();
    // Start point, line end, 7 interior curve samples
    assert_eq!(mesh.vertex_count(), 2 * 9);
    assert!(mesh.is_closed());
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn test_non_positive_depth_rejected() {
    let shape = Shape::new(square_contour(DVec2::ZERO, 1.0));
    for depth in [0.0, -1.0, f64::NAN] {
        let err = extrude_shape(&shape, &ExtrudeParams::with_depth(depth)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }
}

#[test]
fn test_too_few_points_rejected() {
    let shape = Shape::new(Contour::polygon(&[DVec2::ZERO, DVec2::X, DVec2::X]));
    let err = extrude_shape(&shape, &ExtrudeParams::with_depth(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}

#[test]
fn test_vanishing_area_rejected() {
    // Sliver whose area is below EPSILON
    let shape = Shape::new(Contour::polygon(&[
        DVec2::ZERO,
        DVec2::new(1.0, 1e-12),
        DVec2::new(2.0, 0.0),
    ]));
    let err = extrude_shape(&shape, &ExtrudeParams::with_depth(1.0)).unwrap_err();
    assert!(err.to_string().contains("encloses no area"));
}

#[test]
fn test_self_intersecting_rejected() {
    let shape = Shape::new(Contour::polygon(&[
        DVec2::ZERO,
        DVec2::new(2.0, 2.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(0.0, 2.0),
    ]));
    let err = extrude_shape(&shape, &ExtrudeParams::with_depth(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}

#[test]
fn test_hole_outside_outer_rejected() {
    let shape = Shape::new(square_contour(DVec2::ZERO, 4.0))
        .with_hole(square_contour(DVec2::splat(10.0), 1.0));
    let err = extrude_shape(&shape, &ExtrudeParams::with_depth(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}

#[test]
fn test_vertex_limit() {
    let shape = Shape::new(square_contour(DVec2::ZERO, 4.0))
        .with_hole(square_contour(DVec2::splat(1.0), 1.0));
    let params = ExtrudeParams {
        max_vertices: 6,
        ..ExtrudeParams::with_depth(1.0)
    };
    let err = extrude_shape(&shape, &params).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceLimit);
}

#[test]
fn test_extrude_shapes_keeps_input_order() {
    let shapes: Vec<Shape> = (0..16)
        .map(|i| Shape::new(square_contour(DVec2::new(i as f64 * 10.0, 0.0), 2.0)))
        .collect();
    let mesh = extrude_shapes(&shapes, &ExtrudeParams::with_depth(1.0)).unwrap();

    assert_eq!(mesh.vertex_count(), 16 * 8);
    assert!(mesh.is_closed());
    for i in 0..16 {
        assert_eq!(mesh.vertex((i * 8) as u32).x, i as f64 * 10.0);
    }

    let sequential = shapes.iter().fold(crate::Mesh::new(), |mut acc, s| {
        acc.merge(&extrude_shape(s, &ExtrudeParams::with_depth(1.0)).unwrap());
        acc
    });
    assert_eq!(mesh, sequential);
}

#[test]
fn test_extrude_shapes_reports_first_failure() {
    let shapes = vec![
        Shape::new(square_contour(DVec2::ZERO, 2.0)),
        Shape::new(Contour::polygon(&[DVec2::ZERO, DVec2::X])),
    ];
    let err = extrude_shapes(&shapes, &ExtrudeParams::with_depth(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}
