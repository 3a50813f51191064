//! # Error Types
//!
//! Domain-specific error types for shelfscan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelfscan-core errors (this file)                                     │
//! │  ├── CoreError        - Store and id-generation failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  terminal app errors (separate crate)                                  │
//! │  └── ScreenError      - Config, I/O, intent parsing                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ScreenError / Notification        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most store operations never fail from the user's point of view: a failed
//! add becomes an error notification, and edit/delete of an unknown id is a
//! silent no-op. `CoreError` is what the store uses internally and what the
//! non-interactive entry points (seeding, edit buffers) return.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product in the store carries this id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// An id handed out by the id source is already taken.
    ///
    /// ## When This Occurs
    /// - A sequential source starts below an id from the seed list
    /// - The wall clock was set back while the process was running
    #[error("Product id {0} is already in use")]
    DuplicateProductId(ProductId),

    /// The id source could not produce a fresh identifier.
    #[error("Could not generate a product id: {reason}")]
    IdUnavailable { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two seed products with one id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound(ProductId::new(42));
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = CoreError::DuplicateProductId(ProductId::new(1));
        assert_eq!(err.to_string(), "Product id 1 is already in use");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
