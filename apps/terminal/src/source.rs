//! # Barcode Source
//!
//! The capability that turns a camera frame (or a handheld scanner) into a
//! decoded string. The screen only toggles it and asks for permission;
//! decoded payloads reach the screen as [`ScreenEvent::Decoded`] events.
//!
//! ## Keyboard-Wedge Scanner
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  USB/Bluetooth scanners act as keyboards: they "type" the payload and  │
//! │  press Enter. The screen classifies each line when it handles it.      │
//! │                                                                         │
//! │  ScreenEvent::Line ──► LineRouter::route(line, scanning)               │
//! │                   │                                                     │
//! │                   ├─ not scanning ──► parse as Intent                   │
//! │                   │                                                     │
//! │                   └─ scanning                                           │
//! │                        ├─ "cancel" / "quit" ──► Intent                  │
//! │                        ├─ invalid / unaccepted format ──► dropped       │
//! │                        └─ otherwise ──► Decoded(payload)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use shelfscan_core::validation::validate_barcode_payload;
use shelfscan_core::BarcodeFormat;

use crate::config::{CameraFacing, PermissionPolicy, ScannerSettings};
use crate::intent::{Intent, ScreenEvent};

// =============================================================================
// Permission
// =============================================================================

/// Camera permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    /// Never asked.
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionStatus::Undetermined => write!(f, "undetermined"),
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
        }
    }
}

// =============================================================================
// BarcodeSource Trait
// =============================================================================

/// An external barcode-decoding capability.
pub trait BarcodeSource {
    /// Current permission, without prompting.
    fn permission(&self) -> PermissionStatus;

    /// Prompts for permission and returns the answer.
    fn request_permission(&mut self) -> PermissionStatus;

    /// Starts or stops decoding.
    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;
}

// =============================================================================
// Wedge Scanner
// =============================================================================

/// A keyboard-wedge scanner reading from the terminal.
#[derive(Debug)]
pub struct WedgeScanner {
    active: bool,
    formats: Vec<BarcodeFormat>,
    permission: PermissionStatus,
    policy: PermissionPolicy,
    facing: CameraFacing,
}

impl WedgeScanner {
    pub fn new(settings: &ScannerSettings) -> Self {
        WedgeScanner {
            active: false,
            formats: settings.barcode_types.clone(),
            permission: PermissionStatus::Undetermined,
            policy: settings.permission,
            facing: settings.facing,
        }
    }

    /// Returns the router the screen uses to classify typed lines.
    pub fn router(&self) -> LineRouter {
        LineRouter::new(self.formats.clone())
    }
}

impl BarcodeSource for WedgeScanner {
    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    fn request_permission(&mut self) -> PermissionStatus {
        self.permission = match self.policy {
            PermissionPolicy::Grant => PermissionStatus::Granted,
            PermissionPolicy::Deny => PermissionStatus::Denied,
        };
        info!(status = %self.permission, "Camera permission requested");
        self.permission
    }

    fn set_active(&mut self, active: bool) {
        if self.active != active {
            debug!(active, facing = %self.facing, "Scanner toggled");
        }
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// =============================================================================
// Line Router
// =============================================================================

/// Classifies raw input lines into screen events.
///
/// Runs on the screen loop, so `scanning` is the session state at the moment
/// the line is handled, not when it was read.
#[derive(Debug, Clone)]
pub struct LineRouter {
    formats: Vec<BarcodeFormat>,
}

impl Default for LineRouter {
    fn default() -> Self {
        LineRouter::new(BarcodeFormat::ALL.to_vec())
    }
}

impl LineRouter {
    pub fn new(formats: Vec<BarcodeFormat>) -> Self {
        LineRouter { formats }
    }

    /// Routes one input line. Returns `None` for lines that are dropped.
    pub fn route(&self, line: &str, scanning: bool) -> Option<ScreenEvent> {
        let line = line.trim_end_matches(['\r', '\n']);

        if !scanning {
            if line.trim().is_empty() {
                return None;
            }
            return Some(match line.parse::<Intent>() {
                Ok(intent) => ScreenEvent::Intent(intent),
                Err(e) => ScreenEvent::Invalid(e.to_string()),
            });
        }

        match line.trim().to_lowercase().as_str() {
            "cancel" => return Some(ScreenEvent::Intent(Intent::CancelScan)),
            "quit" | "exit" => return Some(ScreenEvent::Intent(Intent::Quit)),
            _ => {}
        }

        if let Err(e) = validate_barcode_payload(line) {
            debug!(error = %e, "Dropping unreadable scan");
            return None;
        }

        match BarcodeFormat::detect(line) {
            Some(format) if self.formats.contains(&format) => {
                Some(ScreenEvent::Decoded(line.to_string()))
            }
            Some(format) => {
                warn!(%format, "Dropping scan in a format that is not enabled");
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscan_core::ProductId;

    fn scanner(formats: Vec<BarcodeFormat>, permission: PermissionPolicy) -> WedgeScanner {
        WedgeScanner::new(&ScannerSettings {
            barcode_types: formats,
            facing: CameraFacing::Back,
            permission,
        })
    }

    #[test]
    fn test_permission_flow() {
        let mut granted = scanner(BarcodeFormat::ALL.to_vec(), PermissionPolicy::Grant);
        assert_eq!(granted.permission(), PermissionStatus::Undetermined);
        assert_eq!(granted.request_permission(), PermissionStatus::Granted);
        assert!(granted.permission().is_granted());

        let mut denied = scanner(BarcodeFormat::ALL.to_vec(), PermissionPolicy::Deny);
        assert_eq!(denied.request_permission(), PermissionStatus::Denied);
        assert!(!denied.permission().is_granted());
    }

    #[test]
    fn test_idle_lines_are_intents() {
        let router = LineRouter::default();

        assert_eq!(
            router.route("delete 1\n", false),
            Some(ScreenEvent::Intent(Intent::Delete {
                id: ProductId::new(1)
            }))
        );
        assert!(matches!(
            router.route("4006381333931", false),
            Some(ScreenEvent::Invalid(_))
        ));
        assert_eq!(router.route("   ", false), None);
    }

    #[test]
    fn test_scanning_lines_are_scans() {
        let router = LineRouter::default();

        assert_eq!(
            router.route("4006381333931\r\n", true),
            Some(ScreenEvent::Decoded("4006381333931".to_string()))
        );
        // While scanning, command words other than cancel/quit are payloads.
        assert_eq!(
            router.route("list", true),
            Some(ScreenEvent::Decoded("list".to_string()))
        );
        assert_eq!(
            router.route("cancel", true),
            Some(ScreenEvent::Intent(Intent::CancelScan))
        );
        assert_eq!(router.route("", true), None);
    }

    #[test]
    fn test_disabled_formats_are_dropped() {
        let source = scanner(vec![BarcodeFormat::Ean13], PermissionPolicy::Grant);
        let router = source.router();

        assert!(router.route("4006381333931", true).is_some());
        assert_eq!(router.route("96385074", true), None);
        assert_eq!(router.route("https://example.com/ñ", true), None);
    }

    #[test]
    fn test_set_active_toggles() {
        let mut source = scanner(BarcodeFormat::ALL.to_vec(), PermissionPolicy::Grant);
        assert!(!source.is_active());
        source.set_active(true);
        assert!(source.is_active());
        source.set_active(false);
        assert!(!source.is_active());
    }
}
