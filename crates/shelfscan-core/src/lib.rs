//! # shelfscan-core: Pure Logic for the Product-Capture Screen
//!
//! This crate is the **heart** of Shelfscan. It owns the product list and
//! the scan session state machine, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelfscan Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────┐            ┌──────────────────────────────┐  │
//! │  │   BarcodeSource      │            │   Presenter                  │  │
//! │  │   (camera / wedge)   │            │   (terminal, JS, ...)        │  │
//! │  └──────────┬───────────┘            └──────────────┬───────────────┘  │
//! │             │ decoded string            intents ▲   │ render           │
//! │  ┌──────────▼──────────────────────────────────────┴───▼───────────┐   │
//! │  │                 apps/terminal (screen event loop)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ shelfscan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   store   │  │    ids    │  │ validation│   │   │
//! │  │   │  Product  │  │ ProductSt │  │ IdSource  │  │  names    │   │   │
//! │  │   │ ScanState │  │  ore      │  │ Clock/Seq │  │  barcodes │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CAMERA • NO RENDERING                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, ScanState, BarcodeFormat)
//! - [`store`] - The product list and its four operations
//! - [`ids`] - Product id generation
//! - [`notification`] - User-facing success/error messages
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and barcode checks
//!
//! ## Example Usage
//!
//! ```rust
//! use shelfscan_core::{ProductStore, ScanState};
//!
//! let mut store = ProductStore::new();
//! store.start_scan();
//!
//! let note = store.on_barcode_decoded("9999").expect("session was active");
//! assert!(!note.is_error());
//! assert_eq!(store.scan_state(), ScanState::Idle);
//! assert_eq!(store.list_products()[0].code, "9999");
//!
//! // The session is over: further decodes are discarded.
//! assert!(store.on_barcode_decoded("9999").is_none());
//! assert_eq!(store.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod notification;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{ClockIdSource, IdSource, SequentialIdSource};
pub use notification::{Notification, NotificationKind};
pub use store::ProductStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name given to every product created from a scan.
pub const DEFAULT_PRODUCT_NAME: &str = "New Product";

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a decoded barcode payload.
///
/// 4296 is the alphanumeric capacity of the largest QR symbol (version 40-L);
/// no supported symbology can carry more.
pub const MAX_BARCODE_LEN: usize = 4296;
