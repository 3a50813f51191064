//! # Screen Error Type
//!
//! Unified error type for the terminal app.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelfscan                              │
//! │                                                                         │
//! │  Startup (config, seeding)                                             │
//! │     └── ScreenError ──────────────────────────► exit with message      │
//! │                                                                         │
//! │  Running screen                                                        │
//! │     ├── bad command line ── InvalidIntent ────► error notification     │
//! │     ├── add failure ─────── (core) ───────────► error notification     │
//! │     ├── permission denied ─ (source) ─────────► permission notice      │
//! │     └── stdout broken ───── Io ───────────────► loop stops             │
//! │                                                                         │
//! │  Nothing inside the screen is fatal except losing the output surface.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelfscan_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for screen operations.
pub type ScreenResult<T> = Result<T, ScreenError>;

/// Terminal app error type.
#[derive(Debug, Error)]
pub enum ScreenError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// A line of input could not be understood as an intent.
    #[error("Invalid command: {0}")]
    InvalidIntent(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering to JSON failed.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Domain error from the product store.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for ScreenError {
    fn from(err: ValidationError) -> Self {
        ScreenError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for ScreenError {
    fn from(err: toml::de::Error) -> Self {
        ScreenError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ScreenError {
    fn from(err: toml::ser::Error) -> Self {
        ScreenError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ScreenError {
    fn from(err: serde_json::Error) -> Self {
        ScreenError::SerializationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScreenError::InvalidIntent("unknown command 'fly'".to_string());
        assert_eq!(err.to_string(), "Invalid command: unknown command 'fly'");

        let err = ScreenError::InvalidConfig("barcode_types must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: barcode_types must not be empty"
        );
    }

    #[test]
    fn test_validation_error_wraps_into_core() {
        let err: ScreenError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, ScreenError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_toml_error_converts() {
        let err: ScreenError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, ScreenError::ConfigLoadFailed(_)));
    }
}
