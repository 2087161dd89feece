//! Error types for gemscout

use thiserror::Error;

/// gemscout error type
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Angle {0} outside [-pi, pi]")]
    AngleOutOfRange(f64),

    #[error("Cell ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Grid is {actual:?} (width, height), expected {expected:?}")]
    DimensionMismatch {
        expected: (i32, i32),
        actual: (i32, i32),
    },

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ScoutError {
    fn from(e: toml::de::Error) -> Self {
        ScoutError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
