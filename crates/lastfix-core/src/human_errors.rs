// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing wording for errors.
//
// Every error is mapped to the notice text the screen shows plus a severity.
// `ActionRequired` errors are shown as the settings prompt; the others are
// plain messages.

use crate::config::Messages;
use crate::error::LastfixError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing to fix; trying again later may succeed.
    Transient,
    /// The user must change something (grant a permission).
    ActionRequired,
    /// Retrying will not help on this device or build.
    Permanent,
}

/// A human-readable error.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Notice text.
    pub message: String,
    /// `ActionRequired` turns the notice into the settings prompt.
    pub severity: Severity,
}

/// Convert a `LastfixError` into the notice wording for it.
pub fn humanize_error(err: &LastfixError, messages: &Messages) -> HumanError {
    match err {
        LastfixError::PermissionDenied(_) => HumanError {
            message: messages.permission_denied_explanation.clone(),
            severity: Severity::ActionRequired,
        },

        LastfixError::LocationUnavailable => HumanError {
            message: messages.no_location_detected.clone(),
            severity: Severity::Transient,
        },

        LastfixError::ProviderFailure(_) | LastfixError::Bridge(_) => HumanError {
            message: messages.location_failed.clone(),
            severity: Severity::Transient,
        },

        LastfixError::PlatformUnavailable => HumanError {
            message: messages.location_failed.clone(),
            severity: Severity::Permanent,
        },

        LastfixError::Config(detail) => HumanError {
            message: format!("Settings could not be loaded ({detail})."),
            severity: Severity::Permanent,
        },

        LastfixError::Io(_) | LastfixError::Serialization(_) => HumanError {
            message: "Settings could not be saved.".into(),
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_needs_action() {
        let messages = Messages::default();
        let human = humanize_error(
            &LastfixError::PermissionDenied("coarse".into()),
            &messages,
        );
        assert_eq!(human.severity, Severity::ActionRequired);
        assert_eq!(human.message, messages.permission_denied_explanation);
    }

    #[test]
    fn absent_location_uses_no_location_text() {
        let messages = Messages::default();
        let human = humanize_error(&LastfixError::LocationUnavailable, &messages);
        assert_eq!(human.message, "No location detected");
        assert_eq!(human.severity, Severity::Transient);
    }

    #[test]
    fn provider_and_bridge_failures_share_wording() {
        let messages = Messages::default();
        let a = humanize_error(&LastfixError::ProviderFailure("timeout".into()), &messages);
        let b = humanize_error(&LastfixError::Bridge("getLastLocation: npe".into()), &messages);
        assert_eq!(a.message, "Failed on getting current location");
        assert_eq!(a.message, b.message);
    }

    #[test]
    fn missing_platform_is_permanent() {
        let human = humanize_error(&LastfixError::PlatformUnavailable, &Messages::default());
        assert_eq!(human.severity, Severity::Permanent);
    }
}
