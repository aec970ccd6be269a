// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Desktop OSes have no runtime location grant, so every permission reports
// granted. There is no fused provider and no settings screen to open: those
// calls return `PlatformUnavailable`.

use lastfix_core::error::{LastfixError, Result};
use lastfix_core::types::{LocationSample, Permission, PermissionResponse, PermissionState};

use crate::callbacks::deliver_permission_response;
use crate::traits::*;

/// Bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativePermissions for StubBridge {
    fn check_permission(&self, _permission: Permission) -> Result<PermissionState> {
        Ok(PermissionState::Granted)
    }

    fn should_show_rationale(&self, _permission: Permission) -> Result<bool> {
        Ok(false)
    }

    fn request_permissions(&self, permissions: &[Permission], request_code: i32) -> Result<()> {
        tracing::debug!(?permissions, request_code, "stub bridge auto-granting request");
        deliver_permission_response(PermissionResponse::Legacy {
            request_code,
            grants: vec![PermissionState::Granted; permissions.len()],
        });
        Ok(())
    }

    fn launch_permission_request(&self, permissions: &[Permission]) -> Result<()> {
        tracing::debug!(?permissions, "stub bridge auto-granting launcher request");
        deliver_permission_response(PermissionResponse::Launcher {
            results: permissions.iter().map(|p| (*p, true)).collect(),
        });
        Ok(())
    }
}

impl NativeLocation for StubBridge {
    fn last_location(&self) -> Result<Option<LocationSample>> {
        tracing::warn!("NativeLocation::last_location called on stub bridge");
        Err(LastfixError::PlatformUnavailable)
    }
}

impl NativeSettings for StubBridge {
    fn open_app_settings(&self, package: &str) -> Result<()> {
        tracing::warn!(package, "NativeSettings::open_app_settings called on stub bridge");
        Err(LastfixError::PlatformUnavailable)
    }
}
