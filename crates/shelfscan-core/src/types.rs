//! # Domain Types
//!
//! Core domain types used throughout Shelfscan.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ScanState     │   │ BarcodeFormat   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  Idle           │   │  Qr             │       │
//! │  │  code (scanned) │   │  Scanning       │   │  Ean13 / Ean8   │       │
//! │  │  name (mutable) │   │                 │   │  Code128        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `id`: assigned once at creation, never reused, unique within a store
//! - `code`: the scanned payload; two products may share a code

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::has_valid_gs1_check_digit;

// =============================================================================
// Product Id
// =============================================================================

/// Unique product identifier.
///
/// Serializes as a bare integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(i64);

impl ProductId {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        ProductId(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ProductId)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "id".to_string(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product captured from a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Scanned barcode payload.
    pub code: String,

    /// Display name, editable by the user.
    pub name: String,
}

impl Product {
    pub fn new(id: ProductId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Product {
            id,
            code: code.into(),
            name: name.into(),
        }
    }
}

/// The two products a fresh screen starts with.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new(ProductId::new(1), "1234", "Coca Cola"),
        Product::new(ProductId::new(2), "6789", "Fanta"),
    ]
}

// =============================================================================
// Scan State
// =============================================================================

/// State of the scan session.
///
/// ```text
///            start_scan()
///   ┌──────┐ ───────────► ┌──────────┐
///   │ Idle │              │ Scanning │
///   └──────┘ ◄─────────── └──────────┘
///        decode / cancel_scan()
///
///   decode while Idle: discarded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
}

impl ScanState {
    #[inline]
    pub const fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning)
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::Scanning => write!(f, "scanning"),
        }
    }
}

// =============================================================================
// Barcode Format
// =============================================================================

/// Symbologies the scanner is allowed to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    Qr,
    Ean13,
    Ean8,
    Code128,
}

impl BarcodeFormat {
    /// Every supported format, in the order the camera is configured with.
    pub const ALL: [BarcodeFormat; 4] = [
        BarcodeFormat::Qr,
        BarcodeFormat::Ean13,
        BarcodeFormat::Ean8,
        BarcodeFormat::Code128,
    ];

    /// Classifies a decoded payload.
    ///
    /// ## Rules
    /// - 8 or 13 digits with a valid GS1 check digit: EAN-8 / EAN-13
    /// - Printable ASCII, at most 80 characters: Code 128
    /// - Anything else that is non-empty: QR
    ///
    /// Returns `None` for an empty payload.
    pub fn detect(payload: &str) -> Option<BarcodeFormat> {
        if payload.is_empty() {
            return None;
        }

        if payload.bytes().all(|b| b.is_ascii_digit()) && has_valid_gs1_check_digit(payload) {
            match payload.len() {
                8 => return Some(BarcodeFormat::Ean8),
                13 => return Some(BarcodeFormat::Ean13),
                _ => {}
            }
        }

        if payload.len() <= 80 && payload.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
            return Some(BarcodeFormat::Code128);
        }

        Some(BarcodeFormat::Qr)
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarcodeFormat::Qr => write!(f, "qr"),
            BarcodeFormat::Ean13 => write!(f, "ean13"),
            BarcodeFormat::Ean8 => write!(f, "ean8"),
            BarcodeFormat::Code128 => write!(f, "code128"),
        }
    }
}

impl FromStr for BarcodeFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "qr" | "qrcode" => Ok(BarcodeFormat::Qr),
            "ean13" => Ok(BarcodeFormat::Ean13),
            "ean8" => Ok(BarcodeFormat::Ean8),
            "code128" => Ok(BarcodeFormat::Code128),
            _ => Err(ValidationError::NotAllowed {
                field: "barcode_type".to_string(),
                allowed: BarcodeFormat::ALL.iter().map(|f| f.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
