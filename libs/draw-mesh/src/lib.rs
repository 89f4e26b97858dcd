//! # Draw Mesh
//!
//! Turns traced drawing shapes into a framed, printable solid.
//!
//! ## Architecture
//!
//! ```text
//! Vec<Shape> → extrude_shapes ─┐
//! ModelOptions → build_frame ──┴→ assemble_model → Model → to_stl_binary / to_stl_ascii
//! ```
//!
//! [`create_drawing_model`] runs the whole chain from a raster, including
//! tracing through `draw-trace`.
//!
//! ## Example
//!
//! ```rust
//! use draw_mesh::{render_stl, ModelOptions};
//! use draw_trace::{RasterImage, Rgba, TraceOptions};
//!
//! let image = RasterImage::filled(20, 20, Rgba::new(0, 0, 0, 255)).unwrap();
//! let stl = render_stl(&image, &ModelOptions::default(), &TraceOptions::default(), true).unwrap();
//! let facets = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]) as usize;
//! assert_eq!(stl.len(), 84 + 50 * facets);
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod model;
pub mod ops;
pub mod pipeline;
pub mod primitives;

pub use error::{ErrorKind, MeshError, MeshResult};
pub use export::{to_stl_ascii, to_stl_binary, write_stl_ascii, write_stl_binary};
pub use mesh::Mesh;
pub use model::{assemble_model, Model, ModelLayout, ModelPart, Transform, DRAWING_PART, FRAME_PART};
pub use ops::{extrude_shape, extrude_shapes, ExtrudeParams, Polygon2D};
pub use pipeline::{create_drawing_model, render_stl, ModelOptions};
pub use primitives::build_frame;
