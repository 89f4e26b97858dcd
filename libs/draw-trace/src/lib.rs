//! # Draw Trace
//!
//! Turns a freehand RGBA drawing into vector shapes.
//!
//! ## Architecture
//!
//! ```text
//! RasterImage → TracePalette::quantize → boundary loops → fitted Contours
//!             → TraceData (layers of TracedPath) → resolve_shapes → Vec<Shape>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use draw_trace::{resolve_shapes, trace_image, RasterImage, Rgba, TraceOptions, TracePalette};
//!
//! // Black square on white paper
//! let image = RasterImage::from_fn(10, 10, |x, y| {
//!     if (3..7).contains(&x) && (3..7).contains(&y) {
//!         Rgba::new(0, 0, 0, 255)
//!     } else {
//!         Rgba::new(255, 255, 255, 255)
//!     }
//! })
//! .unwrap();
//!
//! let trace = trace_image(&image, &TracePalette::default(), &TraceOptions::default()).unwrap();
//! let shapes = resolve_shapes(&trace).unwrap();
//! assert_eq!(shapes.len(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod palette;
pub mod path;
pub mod raster;
pub mod topology;
pub mod tracer;

pub use error::{TraceError, TraceResult};
pub use palette::{QuantizedImage, TracePalette};
pub use path::{Contour, PathSegment, TraceData, TracedLayer, TracedPath};
pub use raster::{RasterImage, Rgba};
pub use topology::{is_near_white, resolve_shapes, resolve_shapes_with, Shape};
pub use tracer::{trace_image, TraceOptions};
