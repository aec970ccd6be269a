// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use lastfix_core::error::Result;
use lastfix_core::types::{LocationSample, Permission, PermissionState};

/// Unified bridge that groups every native capability the location flow uses.
///
/// Shared between the UI task and the blocking pool, hence `Send + Sync`.
pub trait PlatformBridge: NativePermissions + NativeLocation + NativeSettings + Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Runtime permission checks and requests.
pub trait NativePermissions {
    /// Current grant state of a single permission.
    fn check_permission(&self, permission: Permission) -> Result<PermissionState>;

    /// Whether the platform wants an explanation shown before asking again.
    ///
    /// True after the user declined once without choosing "don't ask again".
    fn should_show_rationale(&self, permission: Permission) -> Result<bool>;

    /// Show the system permission dialog.
    ///
    /// Returns once the request is dispatched. The answer arrives later
    /// through [`crate::callbacks::permission_results`].
    fn request_permissions(&self, permissions: &[Permission], request_code: i32) -> Result<()>;

    /// Launch the host's registered multiple-permissions launcher.
    ///
    /// The answer arrives as a `PermissionResponse::Launcher`.
    fn launch_permission_request(&self, permissions: &[Permission]) -> Result<()>;
}

/// Access to the fused location provider.
pub trait NativeLocation {
    /// Best and most recent location the provider has cached.
    ///
    /// `Ok(None)` means the provider answered but has no location yet.
    /// May block; call it off the UI thread.
    fn last_location(&self) -> Result<Option<LocationSample>>;
}

/// Deep links into OS settings.
pub trait NativeSettings {
    /// Open the application-details settings screen for `package`.
    fn open_app_settings(&self, package: &str) -> Result<()>;
}

/// URI passed to the application-details settings intent.
pub fn app_settings_uri(package: &str) -> String {
    format!("package:{package}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_uri_uses_package_scheme() {
        assert_eq!(app_settings_uri("dev.lastfix.app"), "package:dev.lastfix.app");
    }
}
