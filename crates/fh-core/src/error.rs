//! Error types for the fastener command

use fh_cad::{HostError, SketchId};
use thiserror::Error;

/// Errors raised while planning or applying fastener cuts
#[derive(Debug, Clone, Error)]
pub enum FastenerError {
    #[error("Unknown fastener size: {0}")]
    UnknownSizeKind(String),

    #[error("Invalid size '{key}': {reason}")]
    InvalidSize { key: String, reason: String },

    #[error("Duplicate size key: {0}")]
    DuplicateSize(String),

    #[error("No profile in sketch {sketch} matches the drafted outline")]
    ProfileNotFound { sketch: SketchId },

    #[error("{count} profiles in sketch {sketch} match the drafted outline")]
    AmbiguousProfile { sketch: SketchId, count: usize },

    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: &'static str, value: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Result type for fastener operations
pub type FastenerResult<T> = Result<T, FastenerError>;
