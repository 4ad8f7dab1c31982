//! Error types for the gizmo crate

use thiserror::Error;

/// Gizmo configuration errors
#[derive(Debug, Error)]
pub enum GizmoError {
    /// Reading or writing a preferences file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse gizmo config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize gizmo config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of its valid range
    #[error("Invalid gizmo configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gizmo operations
pub type Result<T> = std::result::Result<T, GizmoError>;
