//! # Product Screen
//!
//! Wires the [`ProductStore`] to its two collaborators and runs the event
//! loop.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Screen Event Loop                                    │
//! │                                                                         │
//! │  mount()                                                               │
//! │    └── permission undetermined? ── request it once                     │
//! │                                                                         │
//! │  while let Some(event) = events.recv().await                           │
//! │    │                                                                    │
//! │    ├── Line(text) ──► router.route(text, store.is_scanning()) ──┐      │
//! │    │                  (re-dispatched as Intent / Decoded)  ◄────┘      │
//! │    │                                                                    │
//! │    ├── not granted ──► only `grant` / `quit` accepted,                 │
//! │    │                   everything else re-shows the notice             │
//! │    │                                                                    │
//! │    ├── Intent(StartScan) ──► store.start_scan, source on               │
//! │    ├── Decoded(code) ──────► store.on_barcode_decoded, source off      │
//! │    ├── Intent(Edit/Modify/Delete/Type) ──► store, notify               │
//! │    └── Intent(Quit) / InputClosed ──► break                            │
//! │                                                                         │
//! │  After every change: publish snapshot (watch) + presenter.render       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events are handled strictly one at a time, so a burst of decodes queued
//! behind one scan session adds a single product: the first decode ends the
//! session and the rest are discarded.

use std::ops::ControlFlow;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use shelfscan_core::{
    ClockIdSource, CoreError, IdSource, Notification, Product, ProductId, ProductStore,
};

use crate::error::ScreenResult;
use crate::intent::{Intent, ScreenEvent};
use crate::presenter::{Presenter, ScreenView};
use crate::source::{BarcodeSource, LineRouter, PermissionStatus};

/// The product-capture screen.
pub struct ProductScreen<S, P, I = ClockIdSource> {
    store: ProductStore<I>,
    source: S,
    presenter: P,
    router: LineRouter,
    snapshots: watch::Sender<Vec<Product>>,
}

impl<S, P, I> ProductScreen<S, P, I>
where
    S: BarcodeSource,
    P: Presenter,
    I: IdSource,
{
    pub fn new(store: ProductStore<I>, source: S, presenter: P) -> Self {
        let (snapshots, _) = watch::channel(store.snapshot());
        ProductScreen {
            store,
            source,
            presenter,
            router: LineRouter::default(),
            snapshots,
        }
    }

    /// Replaces the router used for raw terminal lines.
    pub fn with_router(mut self, router: LineRouter) -> Self {
        self.router = router;
        self
    }

    /// Subscribes to product list changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.snapshots.subscribe()
    }

    pub fn store(&self) -> &ProductStore<I> {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Checks camera permission and draws the first frame.
    pub fn mount(&mut self) -> ScreenResult<()> {
        let mut status = self.source.permission();
        if status == PermissionStatus::Undetermined {
            status = self.source.request_permission();
        }
        info!(permission = %status, products = self.store.len(), "Screen mounted");
        self.show()
    }

    /// Runs until `quit`, end of input, or the channel closes.
    ///
    /// Returns the screen so callers can inspect the final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<ScreenEvent>) -> ScreenResult<Self> {
        self.mount()?;

        while let Some(event) = events.recv().await {
            if self.handle(event)?.is_break() {
                break;
            }
        }

        self.source.set_active(false);
        info!(products = self.store.len(), "Screen closed");
        Ok(self)
    }

    /// Handles a single event.
    pub fn handle(&mut self, event: ScreenEvent) -> ScreenResult<ControlFlow<()>> {
        let intent = match event {
            ScreenEvent::InputClosed => {
                debug!("Input closed");
                return Ok(ControlFlow::Break(()));
            }
            ScreenEvent::Invalid(message) => {
                self.presenter
                    .notify(&Notification::error("Invalid input", message))?;
                return Ok(ControlFlow::Continue(()));
            }
            ScreenEvent::Line(line) => {
                return match self.router.route(&line, self.store.is_scanning()) {
                    Some(event) => self.handle(event),
                    None => Ok(ControlFlow::Continue(())),
                };
            }
            ScreenEvent::Decoded(code) => {
                self.on_decoded(&code)?;
                return Ok(ControlFlow::Continue(()));
            }
            ScreenEvent::Intent(intent) => intent,
        };

        let permission = self.source.permission();
        let always_allowed = matches!(intent, Intent::Quit | Intent::RequestPermission);
        if !permission.is_granted() && !always_allowed {
            debug!(?intent, %permission, "Intent refused without camera permission");
            self.presenter.permission_notice(permission)?;
            return Ok(ControlFlow::Continue(()));
        }

        match intent {
            Intent::StartScan => {
                if self.store.is_scanning() {
                    self.cancel_scan();
                } else {
                    self.store.start_scan();
                    self.source.set_active(true);
                    info!("Scan session started");
                }
                self.show()?;
            }
            Intent::CancelScan => {
                self.cancel_scan();
                self.show()?;
            }
            Intent::List => self.show()?,
            Intent::Type { id, text } => match self.store.set_edit_text(id, text) {
                Ok(()) => self.show()?,
                Err(CoreError::ProductNotFound(id)) => {
                    self.presenter.notify(&Notification::error(
                        "Error",
                        format!("No product with id {id}"),
                    ))?;
                }
                Err(e) => return Err(e.into()),
            },
            Intent::Modify { id } => {
                self.log_if_missing(id, "modify");
                let note = self.store.commit_edit(id);
                self.changed(&note)?;
            }
            Intent::Edit { id, name } => {
                self.log_if_missing(id, "edit");
                let note = self.store.edit_product(id, &name);
                self.changed(&note)?;
            }
            Intent::Delete { id } => {
                self.log_if_missing(id, "delete");
                let note = self.store.delete_product(id);
                info!(id = %id, "Product deleted");
                self.changed(&note)?;
            }
            Intent::RequestPermission => {
                self.source.request_permission();
                self.show()?;
            }
            Intent::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }

    fn on_decoded(&mut self, code: &str) -> ScreenResult<()> {
        let Some(note) = self.store.on_barcode_decoded(code) else {
            debug!(code = %code, "Discarding decode outside a scan session");
            return Ok(());
        };

        self.source.set_active(false);
        if note.is_error() {
            warn!(code = %code, "Could not add scanned product");
        } else {
            info!(code = %code, products = self.store.len(), "Scanned product added");
        }
        self.changed(&note)
    }

    fn cancel_scan(&mut self) {
        if self.store.cancel_scan() {
            info!("Scan session cancelled");
        }
        self.source.set_active(false);
    }

    fn log_if_missing(&self, id: ProductId, action: &str) {
        if !self.store.contains(id) {
            debug!(id = %id, action, "No product matches id");
        }
    }

    /// Publishes the list, shows `note`, then redraws.
    fn changed(&mut self, note: &Notification) -> ScreenResult<()> {
        self.snapshots.send_replace(self.store.snapshot());
        self.presenter.notify(note)?;
        self.show()
    }

    /// Draws the list, or the permission notice if scanning is not allowed.
    fn show(&mut self) -> ScreenResult<()> {
        let permission = self.source.permission();
        if !permission.is_granted() {
            return self.presenter.permission_notice(permission);
        }
        let view = ScreenView::from_store(&self.store, permission);
        self.presenter.render(&view)
    }
}
