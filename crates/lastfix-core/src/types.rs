// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the lastfix location flow.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LastfixError;

/// Runtime location permissions the flow can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Approximate (network-derived) location.
    CoarseLocation,
    /// Precise (GPS-derived) location.
    FineLocation,
    /// Location access while the app is not in the foreground.
    BackgroundLocation,
}

impl Permission {
    /// Android manifest identifier for this permission.
    pub const fn android_name(&self) -> &'static str {
        match self {
            Self::CoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
            Self::FineLocation => "android.permission.ACCESS_FINE_LOCATION",
            Self::BackgroundLocation => "android.permission.ACCESS_BACKGROUND_LOCATION",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.android_name())
    }
}

impl FromStr for Permission {
    type Err = LastfixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android.permission.ACCESS_COARSE_LOCATION" => Ok(Self::CoarseLocation),
            "android.permission.ACCESS_FINE_LOCATION" => Ok(Self::FineLocation),
            "android.permission.ACCESS_BACKGROUND_LOCATION" => Ok(Self::BackgroundLocation),
            other => Err(LastfixError::Config(format!("unknown permission: {other}"))),
        }
    }
}

/// Grant state of one permission, or of a whole permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Which permissions a screen needs before it may read the location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionProfile {
    /// Coarse location only.
    Coarse,
    /// Coarse location plus background access.
    CoarseWithBackground,
    /// An explicit list.
    Custom(Vec<Permission>),
}

impl PermissionProfile {
    /// Expand the profile into the permissions it requires, in request order.
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Self::Coarse => vec![Permission::CoarseLocation],
            Self::CoarseWithBackground => {
                vec![Permission::CoarseLocation, Permission::BackgroundLocation]
            }
            Self::Custom(list) => list.clone(),
        }
    }
}

/// How the platform permission request is issued and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStyle {
    /// `requestPermissions` with a request code; answered with a grant array.
    Legacy,
    /// A registered result launcher; answered with per-permission booleans.
    Launcher,
}

/// Answer delivered by the platform after a permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionResponse {
    /// `onRequestPermissionsResult(requestCode, permissions, grantResults)`.
    Legacy {
        request_code: i32,
        grants: Vec<PermissionState>,
    },
    /// Result map from a registered `RequestMultiplePermissions` launcher.
    Launcher { results: BTreeMap<Permission, bool> },
}

/// A single reading from the location provider.
///
/// Both coordinates are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Captions for the two coordinate labels. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiLabels {
    pub latitude: String,
    pub longitude: String,
}

impl Default for UiLabels {
    fn default() -> Self {
        Self {
            latitude: "Latitude".into(),
            longitude: "Longitude".into(),
        }
    }
}

/// How long a notice stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeDuration {
    /// Dismissed automatically after a few seconds.
    Long,
    /// Stays until the user acts on it or it is replaced.
    Indefinite,
}

/// What happens when the user taps a notice's action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Issue the pending permission request (rationale "OK").
    RequestPermissions,
    /// Open the OS application-details settings screen for `package`.
    OpenAppSettings { package: String },
}

/// Action button attached to a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeAction {
    pub label: String,
    pub kind: ActionKind,
}

/// A transient user-facing message (snackbar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub duration: NoticeDuration,
    pub action: Option<NoticeAction>,
}

impl Notice {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Long,
            action: None,
        }
    }

    pub fn with_action(
        text: impl Into<String>,
        label: impl Into<String>,
        kind: ActionKind,
    ) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Indefinite,
            action: Some(NoticeAction {
                label: label.into(),
                kind,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_names_parse_back() {
        for p in [
            Permission::CoarseLocation,
            Permission::FineLocation,
            Permission::BackgroundLocation,
        ] {
            assert_eq!(p.android_name().parse::<Permission>().unwrap(), p);
        }
    }

    #[test]
    fn unknown_permission_is_config_error() {
        let err = "android.permission.CAMERA".parse::<Permission>().unwrap_err();
        assert!(matches!(err, LastfixError::Config(_)));
    }

    #[test]
    fn background_profile_requests_coarse_first() {
        assert_eq!(
            PermissionProfile::CoarseWithBackground.permissions(),
            vec![Permission::CoarseLocation, Permission::BackgroundLocation]
        );
    }

    #[test]
    fn plain_message_is_long_without_action() {
        let notice = Notice::message("hello");
        assert_eq!(notice.duration, NoticeDuration::Long);
        assert!(notice.action.is_none());
    }

    #[test]
    fn actionable_notice_is_indefinite() {
        let notice = Notice::with_action("denied", "Settings", ActionKind::RequestPermissions);
        assert_eq!(notice.duration, NoticeDuration::Indefinite);
        assert_eq!(notice.action.unwrap().label, "Settings");
    }
}
