// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer. Owns the platform bridge and the loaded config and
// hands them to the Dioxus UI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lastfix_bridge::traits::PlatformBridge;
use lastfix_core::AppConfig;
use lastfix_core::config::CONFIG_FILE;
use lastfix_core::error::Result;
use tracing::{info, warn};

use super::data_dir;

/// Shared application services accessible from components via
/// `use_context::<AppServices>()`.
///
/// Cheaply cloneable so it can move into closures and async blocks.
#[derive(Clone)]
pub struct AppServices {
    bridge: Arc<dyn PlatformBridge>,
    config: Arc<AppConfig>,
    data_dir: Option<PathBuf>,
}

impl AppServices {
    /// Initialise services from the on-disk data directory. Call once at
    /// app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::init_in(&dir)
    }

    /// Initialise against an explicit data directory.
    pub fn init_in(dir: &Path) -> Result<Self> {
        let config = AppConfig::load_or_default(dir);

        // First launch: write the defaults out so they can be edited.
        if !dir.join(CONFIG_FILE).exists() {
            config.persist(dir)?;
        }

        let bridge: Arc<dyn PlatformBridge> = Arc::from(lastfix_bridge::platform_bridge());
        info!(
            platform = bridge.platform_name(),
            permissions = ?config.required_permissions(),
            style = ?config.request_style,
            "app services initialised"
        );

        Ok(Self {
            bridge,
            config: Arc::new(config),
            data_dir: Some(dir.to_path_buf()),
        })
    }

    /// Default configuration and no data directory; used when the data
    /// directory is unusable.
    pub fn fallback() -> Self {
        warn!("running with default config, nothing will be persisted");
        Self {
            bridge: Arc::from(lastfix_bridge::platform_bridge()),
            config: Arc::new(AppConfig::default()),
            data_dir: None,
        }
    }

    pub fn bridge(&self) -> Arc<dyn PlatformBridge> {
        Arc::clone(&self.bridge)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_launch_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::init_in(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILE).exists());
        assert_eq!(svc.config(), &AppConfig::default());
        assert_eq!(svc.data_dir(), Some(dir.path()));
    }

    #[test]
    fn existing_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            package_id: "org.example.where".into(),
            ..Default::default()
        };
        config.persist(dir.path()).unwrap();

        let svc = AppServices::init_in(dir.path()).unwrap();
        assert_eq!(svc.config().package_id, "org.example.where");
    }

    #[test]
    fn fallback_has_no_data_dir() {
        let svc = AppServices::fallback();
        assert!(svc.data_dir().is_none());
        assert_eq!(svc.config(), &AppConfig::default());
    }
}
