//! # Presenter
//!
//! The rendering surface. The screen hands it a [`ScreenView`] after every
//! change; it never holds authoritative state of its own.
//!
//! ## Terminal Layout
//! ```text
//! ── Products (2) ── idle
//!   [1] Coca Cola (1234)
//!   [2] Fanta (6789)    typed: Sprite
//! Commands: scan | type <id> <text> | modify <id> | edit <id> <name> | ...
//! ```

use serde::Serialize;
use std::io::Write;

use shelfscan_core::{IdSource, Notification, Product, ProductStore, ScanState};

use crate::error::ScreenResult;
use crate::source::PermissionStatus;

// =============================================================================
// View Model
// =============================================================================

/// One row of the list, with its own edit field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,

    /// Text typed into this row's name field.
    pub edit_text: String,
}

/// Everything a presenter needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub scan_state: ScanState,
    pub permission: PermissionStatus,
    pub rows: Vec<ProductRow>,
}

impl ScreenView {
    pub fn from_store<I: IdSource>(store: &ProductStore<I>, permission: PermissionStatus) -> Self {
        ScreenView {
            scan_state: store.scan_state(),
            permission,
            rows: store
                .list_products()
                .iter()
                .map(|p| ProductRow {
                    product: p.clone(),
                    edit_text: store.edit_text(p.id).to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Presenter Trait
// =============================================================================

/// An external rendering surface.
pub trait Presenter {
    /// Draws the current screen.
    fn render(&mut self, view: &ScreenView) -> ScreenResult<()>;

    /// Shows a one-shot notification.
    fn notify(&mut self, notification: &Notification) -> ScreenResult<()>;

    /// Shows the persistent "camera permission needed" notice with its
    /// retry action.
    fn permission_notice(&mut self, status: PermissionStatus) -> ScreenResult<()>;
}

// =============================================================================
// Terminal Presenter
// =============================================================================

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Frame<'a> {
    View(&'a ScreenView),
    Notification(&'a Notification),
    PermissionNotice { status: PermissionStatus },
}

/// Draws the screen as text (or JSON lines) on a writer.
pub struct TerminalPresenter<W> {
    out: W,
    json: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, json: bool) -> Self {
        TerminalPresenter { out, json }
    }

    /// Consumes the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json(&mut self, frame: &Frame<'_>) -> ScreenResult<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &ScreenView) -> ScreenResult<()> {
        if self.json {
            return self.write_json(&Frame::View(view));
        }

        if view.scan_state.is_scanning() {
            writeln!(
                self.out,
                "Scanning... scan a barcode, or type `cancel` to stop"
            )?;
            self.out.flush()?;
            return Ok(());
        }

        writeln!(self.out, "── Products ({}) ── {}", view.rows.len(), view.scan_state)?;
        if view.rows.is_empty() {
            writeln!(self.out, "  (no products yet)")?;
        }
        for row in &view.rows {
            write!(
                self.out,
                "  [{}] {} ({})",
                row.product.id, row.product.name, row.product.code
            )?;
            if !row.edit_text.is_empty() {
                write!(self.out, "    typed: {}", row.edit_text)?;
            }
            writeln!(self.out)?;
        }
        writeln!(
            self.out,
            "Commands: scan | type <id> <text> | modify <id> | edit <id> <name> | delete <id> | quit"
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> ScreenResult<()> {
        if self.json {
            return self.write_json(&Frame::Notification(notification));
        }
        let marker = if notification.is_error() { "!!" } else { "**" };
        writeln!(self.out, "{marker} {notification}")?;
        self.out.flush()?;
        Ok(())
    }

    fn permission_notice(&mut self, status: PermissionStatus) -> ScreenResult<()> {
        if self.json {
            return self.write_json(&Frame::PermissionNotice { status });
        }
        writeln!(
            self.out,
            "Camera permission is needed to scan (currently {status}). Type `grant` to ask again."
        )?;
        self.out.flush()?;
        Ok(())
    }
}
