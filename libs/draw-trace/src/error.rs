//! # Trace Errors
//!
//! Error types for raster validation, tracing and topology resolution.

use thiserror::Error;

/// Errors that can occur while turning a raster into shapes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TraceError {
    /// Raster size is zero or does not match its pixel buffer
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// Hole references or palette/layer data are malformed
    #[error("Topology error: {message}")]
    Topology { message: String },

    /// Input complexity exceeds a configured bound
    #[error("Resource limit exceeded: {what} is {count} (max: {max})")]
    ResourceLimit {
        what: &'static str,
        count: usize,
        max: usize,
    },
}

impl TraceError {
    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Creates a topology error.
    pub fn topology(message: impl Into<String>) -> Self {
        Self::Topology {
            message: message.into(),
        }
    }

    /// Creates a resource limit error.
    pub fn resource_limit(what: &'static str, count: usize, max: usize) -> Self {
        Self::ResourceLimit { what, count, max }
    }
}

/// Result type alias for tracing operations.
pub type TraceResult<T> = Result<T, TraceError>;
