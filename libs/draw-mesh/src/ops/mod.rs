//! # Mesh Operations
//!
//! Geometry operations that produce meshes from 2D input.

pub mod extrude;

pub use extrude::{extrude_shape, extrude_shapes, ExtrudeParams, Polygon2D};
