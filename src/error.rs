//! Error types for contract-parity.
//!
//! Structural mismatches between platforms are never errors here: they are
//! collected into reports. This type covers malformed input and I/O only.

use thiserror::Error;

use crate::platform::Platform;

/// Result type alias using contract-parity's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// No interface definitions were supplied
    #[error("at least one interface definition is required")]
    EmptyDefinitions,

    /// The requested reference platform has no definition
    #[error("no definition supplied for reference platform '{platform}'")]
    UnknownReferencePlatform { platform: Platform },

    /// A colour value could not be parsed
    #[error("invalid colour value: {0}")]
    InvalidColor(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an unknown reference platform error.
    pub fn unknown_reference(platform: Platform) -> Self {
        Self::UnknownReferencePlatform { platform }
    }

    /// Create an invalid colour error.
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor(value.into())
    }
}
