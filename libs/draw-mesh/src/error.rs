//! # Mesh Errors
//!
//! Error types for extrusion, frame building and export.

use draw_trace::TraceError;
use thiserror::Error;

/// Errors that can occur while building or exporting a model.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Tracing or topology error from the trace layer
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Non-positive or mutually inconsistent sizing parameters
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// Contour cannot be turned into a valid solid
    #[error("Geometry error: {message}")]
    Geometry { message: String },

    /// Input complexity exceeds a configured bound
    #[error("Resource limit exceeded: {what} is {count} (max: {max})")]
    ResourceLimit {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// Writing serialized output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`MeshError`], independent of which stage
/// raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidDimensions,
    Topology,
    Geometry,
    ResourceLimit,
    Io,
}

impl MeshError {
    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Creates a geometry error.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry {
            message: message.into(),
        }
    }

    /// Creates a resource limit error.
    pub fn resource_limit(what: &'static str, count: usize, max: usize) -> Self {
        Self::ResourceLimit { what, count, max }
    }

    /// Returns the error kind, looking through wrapped trace errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Trace(TraceError::InvalidDimensions { .. }) | Self::InvalidDimensions { .. } => {
                ErrorKind::InvalidDimensions
            }
            Self::Trace(TraceError::Topology { .. }) => ErrorKind::Topology,
            Self::Trace(TraceError::ResourceLimit { .. }) | Self::ResourceLimit { .. } => {
                ErrorKind::ResourceLimit
            }
            Self::Geometry { .. } => ErrorKind::Geometry,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
