// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration and its on-disk persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LastfixError, Result};
use crate::types::{Permission, PermissionProfile, RequestStyle, UiLabels};

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// User-visible strings. Stands in for platform string resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown before re-requesting a permission the user declined once.
    pub permission_rationale: String,
    /// Shown when the permission is denied for good.
    pub permission_denied_explanation: String,
    /// Action label that opens the OS settings screen.
    pub settings_action: String,
    /// Action label that confirms the rationale.
    pub ok_action: String,
    /// The provider answered but had no last known location.
    pub no_location_detected: String,
    /// The provider call itself failed.
    pub location_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            permission_rationale: "Location permission is needed for core functionality".into(),
            permission_denied_explanation:
                "Permission was denied, but is needed for core functionality.".into(),
            settings_action: "Settings".into(),
            ok_action: "OK".into(),
            no_location_detected: "No location detected".into(),
            location_failed: "Failed on getting current location".into(),
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application identifier used for the settings deep link.
    pub package_id: String,
    /// Permissions the screen requires before reading the location.
    pub profile: PermissionProfile,
    /// Which platform request API to use.
    pub request_style: RequestStyle,
    /// Request code for legacy-style permission requests.
    pub request_code: i32,
    /// Captions for the coordinate labels.
    pub labels: UiLabels,
    /// Notice texts.
    pub messages: Messages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package_id: "dev.lastfix.app".into(),
            profile: PermissionProfile::Coarse,
            request_style: RequestStyle::Legacy,
            request_code: 34,
            labels: UiLabels::default(),
            messages: Messages::default(),
        }
    }
}

impl AppConfig {
    /// The declarative permission list this configuration requires.
    pub fn required_permissions(&self) -> Vec<Permission> {
        self.profile.permissions()
    }

    /// Reject configurations the flow cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.package_id.trim().is_empty() {
            return Err(LastfixError::Config("package_id must not be empty".into()));
        }
        if self.required_permissions().is_empty() {
            return Err(LastfixError::Config(
                "at least one permission must be required".into(),
            ));
        }
        Ok(())
    }

    /// Load `config.json` from `dir`, falling back to defaults when the file
    /// is missing, unreadable, or invalid.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(d) => d,
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&data) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    warn!(error = %e, "rejecting persisted config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "config file unparseable, using defaults");
                Self::default()
            }
        }
    }

    /// Write this configuration to `config.json` inside `dir`.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_coarse_only() {
        let config = AppConfig::default();
        assert_eq!(config.required_permissions(), vec![Permission::CoarseLocation]);
        assert_eq!(config.request_code, 34);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_custom_profile_is_rejected() {
        let config = AppConfig {
            profile: PermissionProfile::Custom(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LastfixError::Config(_))));
    }

    #[test]
    fn blank_package_is_rejected() {
        let config = AppConfig {
            package_id: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn persisted_config_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            profile: PermissionProfile::CoarseWithBackground,
            request_style: RequestStyle::Launcher,
            ..Default::default()
        };
        config.persist(dir.path()).unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), config);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "package_id": "org.example.where" }"#,
        )
        .unwrap();
        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.package_id, "org.example.where");
        assert_eq!(config.labels, UiLabels::default());
    }
}
