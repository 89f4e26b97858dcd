//! # Config Crate
//!
//! Centralized configuration constants for the drawing-to-solid pipeline.
//! Tolerances, model defaults, resource limits and export constants are
//! defined here so the tracing, meshing and export crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_FRAME_DEPTH, DEFAULT_DRAWING_DEPTH};
//!
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // The drawing stands above the frame floor
//! assert!(DEFAULT_DRAWING_DEPTH > DEFAULT_FRAME_DEPTH);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
