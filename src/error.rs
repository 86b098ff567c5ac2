//! Error types shared across the crate.
//!
//! Simulation steps are total and never fail; errors only come from the vector
//! algebra's one partial operation, startup configuration and score persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Faults raised by the vector algebra.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VectorError {
    /// The normal is built from the slope `-dy/dx`, so a vertical vector has none.
    #[error("normal is undefined for a vector with dx = 0 (dy = {dy})")]
    UndefinedNormal { dy: f64 },
}

/// Startup configuration failures. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("config option '{name}' = {value} is outside {expected}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Score persistence failures surfaced to the caller of a match-end save.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode score records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience alias for persistence results.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
