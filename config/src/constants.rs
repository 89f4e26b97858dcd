//! # Configuration Constants
//!
//! Centralized constants for the drawing-to-solid pipeline. Tracing
//! tolerances, model defaults, resource limits and STL format values are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tracing**: Palette colors, simplification tolerances, background rule
//! - **Model**: Default frame and drawing dimensions
//! - **Limits**: Maximum values for safety bounds
//! - **Export**: STL layout constants

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Relative tolerance used when checking that a triangulation covers the
/// full area of the polygon it was built from.
///
/// # Example
///
/// ```rust
/// use config::constants::AREA_TOLERANCE;
///
/// let polygon_area: f64 = 100.0;
/// let triangle_area = 100.0 + 1e-9;
/// assert!((polygon_area - triangle_area).abs() <= AREA_TOLERANCE * polygon_area);
/// ```
pub const AREA_TOLERANCE: f64 = 1e-6;

// =============================================================================
// TRACING CONSTANTS
// =============================================================================

/// Ink color of the default trace palette (transparent black).
pub const INK_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Background color of the default trace palette (opaque white).
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Default maximum deviation, in pixels, for collapsing a run of contour
/// points into one straight line.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_LINE_TOLERANCE;
///
/// assert!(DEFAULT_LINE_TOLERANCE < 0.5); // stays inside a pixel
/// ```
pub const DEFAULT_LINE_TOLERANCE: f64 = 0.1;

/// Default maximum deviation, in pixels, for fitting a run of contour points
/// with one quadratic curve. Zero disables curve fitting.
pub const DEFAULT_CURVE_TOLERANCE: f64 = 0.1;

/// Channel value above which a palette color counts as background.
///
/// A layer is skipped when its red, green and blue channels all exceed this
/// value.
///
/// # Example
///
/// ```rust
/// use config::constants::BACKGROUND_CHANNEL_THRESHOLD;
///
/// let white = [255u8, 255, 255];
/// assert!(white.iter().all(|&c| c > BACKGROUND_CHANNEL_THRESHOLD));
/// ```
pub const BACKGROUND_CHANNEL_THRESHOLD: u8 = 240;

/// Number of straight pieces each quadratic curve is flattened into before
/// triangulation.
pub const CURVE_SUBDIVISIONS: u32 = 8;

/// Number of times a contour is refitted at halved tolerances before the
/// tracer falls back to the exact edge-midpoint outline.
pub const MAX_REFIT_ATTEMPTS: u32 = 6;

// =============================================================================
// MODEL CONSTANTS
// =============================================================================

/// Default depth of the frame floor the drawing sits on.
pub const DEFAULT_FRAME_DEPTH: f64 = 5.0;

/// Default extrusion depth of the drawing.
pub const DEFAULT_DRAWING_DEPTH: f64 = 10.0;

/// Default width of the frame border.
pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;

/// Default depth of the frame border.
pub const DEFAULT_BORDER_DEPTH: f64 = 2.0;

/// Frame depth as a fraction of the average model side, used by
/// proportional sizing.
pub const FRAME_DEPTH_RATIO: f64 = 0.02;

/// Drawing depth as a fraction of the average model side.
pub const DRAWING_DEPTH_RATIO: f64 = 0.10;

/// Border width as a fraction of the average model side.
pub const BORDER_WIDTH_RATIO: f64 = 0.02;

/// Border depth as a fraction of the average model side.
pub const BORDER_DEPTH_RATIO: f64 = 0.10;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of pixels accepted by the tracer (4096 x 4096).
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_PIXELS;
///
/// let (width, height) = (1920usize, 1080usize);
/// assert!(width * height <= MAX_PIXELS);
/// ```
pub const MAX_PIXELS: usize = 4096 * 4096;

/// Maximum number of traced paths across all layers of one image.
pub const MAX_TRACED_PATHS: usize = 100_000;

/// Maximum number of boundary vertices in one flattened shape.
pub const MAX_POLYGON_VERTICES: usize = 1_000_000;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL facet record (normal + 3 vertices + attribute).
pub const STL_FACET_SIZE: usize = 50;

/// Text written at the start of binary STL headers.
pub const STL_HEADER_TEXT: &str = "binary STL exported by draw-modeler";

/// Solid name used when a model has no explicit name.
pub const DEFAULT_SOLID_NAME: &str = "drawing";

// =============================================================================
// RESOURCE LIMITS
// =============================================================================

/// Upper bounds on input complexity shared by the tracer and the extruder.
///
/// # Examples
/// ```
/// use config::constants::ResourceLimits;
/// let limits = ResourceLimits::default();
/// assert!(limits.max_paths > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum number of raster pixels.
    pub max_pixels: usize,
    /// Maximum number of traced paths per image.
    pub max_paths: usize,
    /// Maximum number of boundary vertices per shape.
    pub max_polygon_vertices: usize,
}

impl ResourceLimits {
    /// Builds limits, rejecting zero bounds.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ResourceLimits;
    /// let limits = ResourceLimits::new(1024, 16, 4096).expect("valid limits");
    /// assert_eq!(limits.max_paths, 16);
    /// assert!(ResourceLimits::new(0, 16, 4096).is_err());
    /// ```
    pub fn new(
        max_pixels: usize,
        max_paths: usize,
        max_polygon_vertices: usize,
    ) -> Result<Self, ConfigError> {
        if max_pixels == 0 {
            return Err(ConfigError::ZeroLimit("max_pixels"));
        }
        if max_paths == 0 {
            return Err(ConfigError::ZeroLimit("max_paths"));
        }
        if max_polygon_vertices < 3 {
            return Err(ConfigError::ZeroLimit("max_polygon_vertices"));
        }
        Ok(Self {
            max_pixels,
            max_paths,
            max_polygon_vertices,
        })
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_pixels: MAX_PIXELS,
            max_paths: MAX_TRACED_PATHS,
            max_polygon_vertices: MAX_POLYGON_VERTICES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a limit would reject every input.
    ZeroLimit(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroLimit(name) => write!(f, "{name} is too small to accept any input"),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
