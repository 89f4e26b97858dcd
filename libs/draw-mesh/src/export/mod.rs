//! # Export
//!
//! Serializers for assembled models.

pub mod stl;

pub use stl::{to_stl_ascii, to_stl_binary, write_stl_ascii, write_stl_binary};
