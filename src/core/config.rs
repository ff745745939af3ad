//! Persisted user preferences read at the start of a selection session
//!
//! The host owns storage; these values arrive either from a TOML settings file
//! or from the host's preference lookup. Keys match the host setting names.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{Result, WizardError};
use crate::feats::criteria::SortMethod;
use crate::host::HostBridge;

/// Setting key for the default feat ordering
pub const FEAT_SORT_METHOD_KEY: &str = "feat-sort-method";

/// Setting key for marking feats that carry prerequisites
pub const SHOW_FEAT_PREREQUISITES_KEY: &str = "show-feat-prerequisites";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "levelup_wizard=debug";

/// Preferences that shape a feat selection session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WizardSettings {
    /// Default ordering as `<METHOD>_<ORDER>`, e.g. `LEVEL_DESC` or `ALPHA_ASC`
    pub feat_sort_method: String,

    /// Append `*` to the display name of feats with prerequisites
    pub show_feat_prerequisites: bool,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            feat_sort_method: "LEVEL_DESC".to_string(),
            show_feat_prerequisites: true,
        }
    }
}

impl WizardSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: WizardSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Read settings through the host's preference store
    ///
    /// Missing preferences keep their defaults. An unparsable sort method is
    /// logged and replaced by the default rather than failing the session.
    pub fn from_host<H: HostBridge + ?Sized>(host: &H) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(method) = host.get_preference(FEAT_SORT_METHOD_KEY)? {
            if method.parse::<SortMethod>().is_ok() {
                settings.feat_sort_method = method;
            } else {
                tracing::warn!(
                    "Ignoring invalid {} preference {:?}",
                    FEAT_SORT_METHOD_KEY,
                    method
                );
            }
        }

        if let Some(show) = host.get_preference(SHOW_FEAT_PREREQUISITES_KEY)? {
            match show.trim().to_lowercase().as_str() {
                "true" => settings.show_feat_prerequisites = true,
                "false" => settings.show_feat_prerequisites = false,
                other => tracing::warn!(
                    "Ignoring invalid {} preference {:?}",
                    SHOW_FEAT_PREREQUISITES_KEY,
                    other
                ),
            }
        }

        Ok(settings)
    }

    /// Validate that the stored sort method is understood
    pub fn validate(&self) -> Result<()> {
        self.sort_method().map(|_| ())
    }

    pub fn sort_method(&self) -> Result<SortMethod> {
        self.feat_sort_method.parse()
    }

    /// Serialize back to TOML for writing through the host
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| WizardError::InvalidSettings(e.to_string()))
    }
}
