//! Error types for the Drape simulator.
//!
//! Only construction, configuration and I/O are fallible; the
//! per-frame physics step never returns an error.

use thiserror::Error;

/// Unified error type for the Drape workspace.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Cloth grid description is unusable (zero points, bad pin coordinates, ...).
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Physical parameter is out of range.
    #[error("Invalid cloth parameter: {0}")]
    InvalidParameters(String),

    /// Scene or simulation configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh connectivity is inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;
