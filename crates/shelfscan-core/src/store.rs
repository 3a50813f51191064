//! # Product Store
//!
//! Owns the product list, the scan session state and the per-row edit
//! buffers. Everything the screen does to products goes through here.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Store Operations                             │
//! │                                                                         │
//! │  Event                       Store Method            State Change       │
//! │  ─────                       ────────────            ────────────       │
//! │                                                                         │
//! │  Tap "Scan" ───────────────► start_scan() ─────────► Idle → Scanning    │
//! │                                                                         │
//! │  Camera decodes "9999" ────► on_barcode_decoded() ─► Scanning → Idle    │
//! │                                                      products.push(..)  │
//! │                                                                         │
//! │  Type into row 7 ──────────► set_edit_text(7, ..) ─► buffers[7] = ..    │
//! │  Tap "Modify" on row 7 ────► commit_edit(7) ───────► products[7].name   │
//! │                                                                         │
//! │  Tap "Delete" on row 7 ────► delete_product(7) ────► products.remove    │
//! │                                                                         │
//! │  Render ───────────────────► list_products() ──────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Product ids are unique at all times
//! - Insertion order is preserved; deletes keep the relative order of the rest
//! - At most one product is added per scan session
//! - A decode while `Idle` is discarded, never queued
//! - Edit buffers are per row: text typed into one row never reaches another

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::ids::{ClockIdSource, IdSource};
use crate::notification::Notification;
use crate::types::{Product, ProductId, ScanState};
use crate::validation::{validate_product_name, validate_unique_ids};
use crate::DEFAULT_PRODUCT_NAME;

/// The product list behind the capture screen.
#[derive(Debug, Clone)]
pub struct ProductStore<I = ClockIdSource> {
    products: Vec<Product>,
    scan_state: ScanState,
    edit_buffers: HashMap<ProductId, String>,
    default_name: String,
    ids: I,
}

impl ProductStore<ClockIdSource> {
    /// Creates an empty store with time-derived ids.
    pub fn new() -> Self {
        Self::with_id_source(ClockIdSource::new())
    }
}

impl Default for ProductStore<ClockIdSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> ProductStore<I> {
    /// Creates an empty store drawing ids from `ids`.
    pub fn with_id_source(ids: I) -> Self {
        ProductStore {
            products: Vec::new(),
            scan_state: ScanState::Idle,
            edit_buffers: HashMap::new(),
            default_name: DEFAULT_PRODUCT_NAME.to_string(),
            ids,
        }
    }

    /// Replaces the list with `products`.
    ///
    /// Fails if two of them share an id.
    pub fn with_products(mut self, products: Vec<Product>) -> CoreResult<Self> {
        validate_unique_ids(&products)?;
        self.products = products;
        self.edit_buffers.clear();
        Ok(self)
    }

    /// Sets the name given to scanned products.
    pub fn with_default_name(mut self, name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        self.default_name = name;
        Ok(self)
    }

    // =========================================================================
    // Scan Session
    // =========================================================================

    pub fn scan_state(&self) -> ScanState {
        self.scan_state
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_state.is_scanning()
    }

    /// Opens a scan session.
    pub fn start_scan(&mut self) {
        self.scan_state = ScanState::Scanning;
    }

    /// Ends the scan session without adding anything.
    ///
    /// Returns whether a session was actually open.
    pub fn cancel_scan(&mut self) -> bool {
        let was_scanning = self.is_scanning();
        self.scan_state = ScanState::Idle;
        was_scanning
    }

    /// Handles a decoded barcode.
    ///
    /// ## Behavior
    /// - `Idle`: the decode is discarded and `None` is returned
    /// - `Scanning`: the session ends first, then a product named after the
    ///   default name is appended
    ///
    /// ## Returns
    /// - `Some(success)` carrying the code when the product was added
    /// - `Some(error)` when the product could not be built; the list is
    ///   untouched but the session is still over
    pub fn on_barcode_decoded(&mut self, code: &str) -> Option<Notification> {
        if !self.is_scanning() {
            return None;
        }
        self.scan_state = ScanState::Idle;

        match self.add_scanned(code) {
            Ok(_) => Some(Notification::product_added(code)),
            Err(_) => Some(Notification::add_failed()),
        }
    }

    fn add_scanned(&mut self, code: &str) -> CoreResult<ProductId> {
        let id = self.ids.next_id()?;
        if self.get(id).is_some() {
            return Err(CoreError::DuplicateProductId(id));
        }

        self.products
            .push(Product::new(id, code, self.default_name.as_str()));
        Ok(id)
    }

    // =========================================================================
    // Edit / Delete / List
    // =========================================================================

    /// Renames the product with `id`.
    ///
    /// An empty `new_name` keeps the current name. An unknown id is a no-op.
    /// Either way the row's edit buffer is cleared and a success
    /// notification is returned.
    pub fn edit_product(&mut self, id: ProductId, new_name: &str) -> Notification {
        if !new_name.is_empty() {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
                product.name = new_name.to_string();
            }
        }

        self.edit_buffers.remove(&id);
        Notification::product_updated()
    }

    /// Removes the product with `id`, if present.
    pub fn delete_product(&mut self, id: ProductId) -> Notification {
        self.products.retain(|p| p.id != id);
        self.edit_buffers.remove(&id);
        Notification::product_deleted()
    }

    /// The current list, in insertion order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// An owned copy of the current list.
    pub fn snapshot(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Per-Row Edit Buffers
    // =========================================================================

    /// Records what the user has typed into the name field of row `id`.
    pub fn set_edit_text(&mut self, id: ProductId, text: impl Into<String>) -> CoreResult<()> {
        if !self.contains(id) {
            return Err(CoreError::ProductNotFound(id));
        }
        self.edit_buffers.insert(id, text.into());
        Ok(())
    }

    /// The text currently typed into row `id` (empty if nothing).
    pub fn edit_text(&self, id: ProductId) -> &str {
        self.edit_buffers.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Applies row `id`'s edit buffer as its new name ("Modify").
    pub fn commit_edit(&mut self, id: ProductId) -> Notification {
        let text = self.edit_buffers.remove(&id).unwrap_or_default();
        self.edit_product(id, &text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
