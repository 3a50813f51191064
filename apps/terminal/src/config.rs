//! # Screen Configuration
//!
//! Configuration for the product-capture screen.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELFSCAN_DEFAULT_NAME="Unnamed"                                   │
//! │     SHELFSCAN_BARCODE_TYPES=ean13,ean8                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path> / SHELFSCAN_CONFIG                                 │
//! │     ~/.config/shelfscan/shelfscan.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "New Product", demo seed on, all barcode types, back camera        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! default_product_name = "New Product"
//! seed_demo = true
//!
//! [scanner]
//! barcode_types = ["qr", "ean13", "ean8", "code128"]
//! facing = "back"
//! permission = "grant"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use shelfscan_core::validation::validate_product_name;
use shelfscan_core::{BarcodeFormat, DEFAULT_PRODUCT_NAME};

use crate::error::{ScreenError, ScreenResult};

// =============================================================================
// Camera Facing
// =============================================================================

/// Which camera the scanner should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraFacing::Back => write!(f, "back"),
            CameraFacing::Front => write!(f, "front"),
        }
    }
}

impl FromStr for CameraFacing {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "back" | "rear" => Ok(CameraFacing::Back),
            "front" | "user" => Ok(CameraFacing::Front),
            other => Err(ScreenError::InvalidConfig(format!(
                "Unknown camera facing: '{}'. Valid options: back, front",
                other
            ))),
        }
    }
}

// =============================================================================
// Permission Policy
// =============================================================================

/// How the terminal scanner answers a camera permission request.
///
/// A terminal has no OS permission prompt; this stands in for the user's
/// answer so the denied path can be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionPolicy {
    #[default]
    Grant,
    Deny,
}

impl FromStr for PermissionPolicy {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grant" | "granted" | "allow" => Ok(PermissionPolicy::Grant),
            "deny" | "denied" => Ok(PermissionPolicy::Deny),
            other => Err(ScreenError::InvalidConfig(format!(
                "Unknown permission policy: '{}'. Valid options: grant, deny",
                other
            ))),
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Product list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Name given to freshly scanned products.
    #[serde(default = "default_product_name")]
    pub default_product_name: String,

    /// Start with the two demo products.
    #[serde(default = "default_true")]
    pub seed_demo: bool,
}

fn default_product_name() -> String {
    DEFAULT_PRODUCT_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            default_product_name: default_product_name(),
            seed_demo: true,
        }
    }
}

// =============================================================================
// Scanner Settings
// =============================================================================

/// Barcode source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerSettings {
    /// Symbologies that are accepted; anything else is dropped.
    #[serde(default = "default_barcode_types")]
    pub barcode_types: Vec<BarcodeFormat>,

    #[serde(default)]
    pub facing: CameraFacing,

    #[serde(default)]
    pub permission: PermissionPolicy,
}

fn default_barcode_types() -> Vec<BarcodeFormat> {
    BarcodeFormat::ALL.to_vec()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            barcode_types: default_barcode_types(),
            facing: CameraFacing::default(),
            permission: PermissionPolicy::default(),
        }
    }
}

// =============================================================================
// Main Screen Configuration
// =============================================================================

/// Complete screen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub scanner: ScannerSettings,
}

impl ScreenConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`shelfscan.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> ScreenResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML file without applying environment overrides.
    fn from_file(path: &Path) -> ScreenResult<Self> {
        info!(?path, "Loading screen config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScreenError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load screen config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ScreenResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ScreenError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Screen config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ScreenResult<()> {
        validate_product_name(&self.store.default_product_name)?;

        if self.scanner.barcode_types.is_empty() {
            return Err(ScreenError::InvalidConfig(
                "scanner.barcode_types must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SHELFSCAN_*` overrides read through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("SHELFSCAN_DEFAULT_NAME") {
            debug!(name = %name, "Overriding default product name from environment");
            self.store.default_product_name = name;
        }

        if let Some(seed) = var("SHELFSCAN_SEED_DEMO") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.store.seed_demo = true,
                "0" | "false" | "no" | "off" => self.store.seed_demo = false,
                _ => warn!(value = %seed, "Unknown SHELFSCAN_SEED_DEMO value"),
            }
        }

        if let Some(types) = var("SHELFSCAN_BARCODE_TYPES") {
            let parsed: Result<Vec<BarcodeFormat>, _> = types
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(str::parse)
                .collect();
            match parsed {
                Ok(formats) => self.scanner.barcode_types = formats,
                Err(e) => warn!(value = %types, error = %e, "Ignoring SHELFSCAN_BARCODE_TYPES"),
            }
        }

        if let Some(facing) = var("SHELFSCAN_CAMERA_FACING") {
            match facing.parse() {
                Ok(parsed) => self.scanner.facing = parsed,
                Err(e) => warn!(error = %e, "Ignoring SHELFSCAN_CAMERA_FACING"),
            }
        }

        if let Some(policy) = var("SHELFSCAN_CAMERA_PERMISSION") {
            match policy.parse() {
                Ok(parsed) => self.scanner.permission = parsed,
                Err(e) => warn!(error = %e, "Ignoring SHELFSCAN_CAMERA_PERMISSION"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelfscan", "shelfscan")
            .map(|dirs| dirs.config_dir().join("shelfscan.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ScreenConfig::default();
        assert_eq!(config.store.default_product_name, "New Product");
        assert!(config.store.seed_demo);
        assert_eq!(config.scanner.barcode_types.len(), 4);
        assert_eq!(config.scanner.facing, CameraFacing::Back);
        assert_eq!(config.scanner.permission, PermissionPolicy::Grant);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ScreenConfig = toml::from_str(
            r#"
            [scanner]
            barcode_types = ["ean13"]
            "#,
        )
        .unwrap();
        assert_eq!(config.scanner.barcode_types, vec![BarcodeFormat::Ean13]);
        assert_eq!(config.store.default_product_name, "New Product");
        assert!(config.store.seed_demo);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScreenConfig::default();
        config.store.default_product_name = "  ".to_string();
        assert!(config.validate().is_err());

        config.store.default_product_name = "Item".to_string();
        config.scanner.barcode_types.clear();
        assert!(matches!(
            config.validate(),
            Err(ScreenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ScreenConfig::default();
        config.apply_overrides(env(&[
            ("SHELFSCAN_DEFAULT_NAME", "Unnamed"),
            ("SHELFSCAN_SEED_DEMO", "off"),
            ("SHELFSCAN_BARCODE_TYPES", "ean13, ean8"),
            ("SHELFSCAN_CAMERA_FACING", "front"),
            ("SHELFSCAN_CAMERA_PERMISSION", "deny"),
        ]));

        assert_eq!(config.store.default_product_name, "Unnamed");
        assert!(!config.store.seed_demo);
        assert_eq!(
            config.scanner.barcode_types,
            vec![BarcodeFormat::Ean13, BarcodeFormat::Ean8]
        );
        assert_eq!(config.scanner.facing, CameraFacing::Front);
        assert_eq!(config.scanner.permission, PermissionPolicy::Deny);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ScreenConfig::default();
        config.apply_overrides(env(&[
            ("SHELFSCAN_SEED_DEMO", "maybe"),
            ("SHELFSCAN_BARCODE_TYPES", "ean13,pdf417"),
            ("SHELFSCAN_CAMERA_FACING", "sideways"),
        ]));

        assert!(config.store.seed_demo);
        assert_eq!(config.scanner.barcode_types.len(), 4);
        assert_eq!(config.scanner.facing, CameraFacing::Back);
    }

    #[test]
    fn test_toml_serialization() {
        let config = ScreenConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[scanner]"));

        let back: ScreenConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.scanner.barcode_types, config.scanner.barcode_types);
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = std::env::temp_dir().join(format!("shelfscan-config-{}", std::process::id()));
        let path = dir.join("shelfscan.toml");

        let mut config = ScreenConfig::default();
        config.store.default_product_name = "Saved".to_string();
        config.save(Some(path.clone())).unwrap();

        let loaded = ScreenConfig::from_file(&path).unwrap();
        assert_eq!(loaded.store.default_product_name, "Saved");
        assert_eq!(loaded.scanner.barcode_types.len(), 4);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let path = std::env::temp_dir()
            .join(format!("shelfscan-missing-{}", std::process::id()))
            .join("shelf.toml");

        let err = ScreenConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ScreenError::ConfigLoadFailed(_)));
    }
}
