//! # Tests for Config Constants
//!
//! Unit tests verifying the consistency of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_area_tolerance_is_relative() {
    assert!(AREA_TOLERANCE > EPSILON);
    assert!(AREA_TOLERANCE < 1e-3);
}

// =============================================================================
// TRACING TESTS
// =============================================================================

#[test]
fn test_palette_colors_distinct() {
    assert_ne!(INK_COLOR, BACKGROUND_COLOR);
}

#[test]
fn test_background_color_is_background() {
    assert!(BACKGROUND_COLOR[..3]
        .iter()
        .all(|&c| c > BACKGROUND_CHANNEL_THRESHOLD));
}

#[test]
fn test_ink_color_is_not_background() {
    assert!(INK_COLOR[..3]
        .iter()
        .all(|&c| c <= BACKGROUND_CHANNEL_THRESHOLD));
}

#[test]
fn test_tolerances_stay_inside_pixel() {
    // Contour points sit half a pixel from pixel centers
    assert!(DEFAULT_LINE_TOLERANCE >= 0.0 && DEFAULT_LINE_TOLERANCE < 0.35);
    assert!(DEFAULT_CURVE_TOLERANCE >= 0.0 && DEFAULT_CURVE_TOLERANCE < 0.35);
}

#[test]
fn test_curve_subdivisions_positive() {
    assert!(CURVE_SUBDIVISIONS >= 1);
}

#[test]
fn test_refit_attempts_positive() {
    assert!(MAX_REFIT_ATTEMPTS >= 1);
}

// =============================================================================
// MODEL TESTS
// =============================================================================

#[test]
fn test_model_defaults() {
    assert_eq!(DEFAULT_FRAME_DEPTH, 5.0);
    assert_eq!(DEFAULT_DRAWING_DEPTH, 10.0);
    assert_eq!(DEFAULT_BORDER_WIDTH, 2.0);
    assert_eq!(DEFAULT_BORDER_DEPTH, 2.0);
}

#[test]
fn test_proportional_ratios() {
    for ratio in [
        FRAME_DEPTH_RATIO,
        DRAWING_DEPTH_RATIO,
        BORDER_WIDTH_RATIO,
        BORDER_DEPTH_RATIO,
    ] {
        assert!(ratio > 0.0 && ratio < 0.5);
    }
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_default_limits_match_constants() {
    let limits = ResourceLimits::default();
    assert_eq!(limits.max_pixels, MAX_PIXELS);
    assert_eq!(limits.max_paths, MAX_TRACED_PATHS);
    assert_eq!(limits.max_polygon_vertices, MAX_POLYGON_VERTICES);
}

#[test]
fn test_limits_reject_zero() {
    assert_eq!(
        ResourceLimits::new(10, 0, 10),
        Err(ConfigError::ZeroLimit("max_paths"))
    );
    assert!(ResourceLimits::new(10, 10, 2).is_err());
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::ZeroLimit("max_pixels");
    assert!(err.to_string().contains("max_pixels"));
}

// =============================================================================
// EXPORT TESTS
// =============================================================================

#[test]
fn test_stl_layout() {
    // normal + 3 vertices as 12 f32, plus a u16 attribute
    assert_eq!(STL_FACET_SIZE, 12 * 4 + 2);
    assert_eq!(STL_HEADER_SIZE, 80);
    assert!(STL_HEADER_TEXT.len() <= STL_HEADER_SIZE);
    assert!(!STL_HEADER_TEXT.starts_with("solid"));
}

// =============================================================================
// APPROX_ZERO TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(-1e-12));
    assert!(!approx_zero(1e-3));
}
