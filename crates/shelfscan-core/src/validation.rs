//! # Validation Module
//!
//! Input validation utilities for Shelfscan.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: BarcodeSource                                                │
//! │  └── validate_barcode_payload: empty / oversized payloads never        │
//! │      reach the store                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Configuration / seeding                                      │
//! │  ├── validate_product_name: the configured default name                │
//! │  └── validate_unique_ids: the seed list                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ProductStore                                                 │
//! │  └── id collisions rejected on every add                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits are deliberately NOT validated beyond "empty means keep the old
//! name": the user may type any label they like.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;
use crate::{MAX_BARCODE_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name used as a default label.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use shelfscan_core::validation::validate_product_name;
///
/// assert!(validate_product_name("New Product").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a decoded barcode payload before it is handed to the store.
pub fn validate_barcode_payload(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if code.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Checks the GS1 (EAN/UPC) check digit of an all-digit string.
///
/// Weights alternate 3,1,3,... starting from the digit next to the check
/// digit. Returns `false` for non-digits or strings shorter than 2.
pub fn has_valid_gs1_check_digit(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    if bytes.len() < 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let (data, check) = bytes.split_at(bytes.len() - 1);
    let sum: u32 = data
        .iter()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                d * 3
            } else {
                d
            }
        })
        .sum();

    (10 - sum % 10) % 10 == u32::from(check[0] - b'0')
}

/// Ensures no two products share an id.
pub fn validate_unique_ids(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: product.id.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca Cola").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_barcode_payload() {
        assert!(validate_barcode_payload("4006381333931").is_ok());
        assert!(validate_barcode_payload("https://example.com").is_ok());
        assert!(validate_barcode_payload("").is_err());
        assert!(validate_barcode_payload("12\n34").is_err());
        assert!(validate_barcode_payload(&"9".repeat(MAX_BARCODE_LEN + 1)).is_err());
    }

    #[test]
    fn test_gs1_check_digit() {
        assert!(has_valid_gs1_check_digit("4006381333931"));
        assert!(has_valid_gs1_check_digit("96385074"));
        assert!(!has_valid_gs1_check_digit("4006381333932"));
        assert!(!has_valid_gs1_check_digit("12345678"));
        assert!(!has_valid_gs1_check_digit("ABC"));
        assert!(!has_valid_gs1_check_digit("7"));
    }

    #[test]
    fn test_validate_unique_ids() {
        let ok = vec![
            Product::new(ProductId::new(1), "1234", "Coca Cola"),
            Product::new(ProductId::new(2), "1234", "Coca Cola Zero"),
        ];
        assert!(validate_unique_ids(&ok).is_ok());

        let dup = vec![
            Product::new(ProductId::new(1), "1234", "Coca Cola"),
            Product::new(ProductId::new(1), "6789", "Fanta"),
        ];
        let err = validate_unique_ids(&dup).unwrap_err();
        assert_eq!(err.to_string(), "id '1' already exists");
    }
}
