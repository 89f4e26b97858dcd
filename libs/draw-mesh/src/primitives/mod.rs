//! # Primitives
//!
//! Parametric meshes that do not come from traced input.

pub mod frame;

pub use frame::build_frame;
