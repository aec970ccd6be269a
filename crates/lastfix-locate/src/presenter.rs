// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient user-facing notices (snackbars).

use lastfix_bridge::traits::NativeSettings;
use lastfix_core::config::Messages;
use lastfix_core::error::{LastfixError, Result};
use lastfix_core::human_errors::{Severity, humanize_error};
use lastfix_core::types::{ActionKind, Notice};
use tracing::{info, warn};

/// Surface that actually draws a notice. Implemented by the UI layer.
pub trait Notifier {
    /// Show `notice`, replacing whatever notice is currently on screen.
    fn show(&mut self, notice: Notice);
}

/// Builds notices from the configured wording and hands them to a [`Notifier`].
///
/// `package` is the application id the settings prompt deep-links to.
pub struct NotificationPresenter<N> {
    notifier: N,
    messages: Messages,
    package: String,
}

impl<N: Notifier> NotificationPresenter<N> {
    pub fn new(notifier: N, messages: Messages, package: impl Into<String>) -> Self {
        Self {
            notifier,
            messages,
            package: package.into(),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Plain message, dismissed automatically.
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.notifier.show(Notice::message(text));
    }

    /// Message that stays up with a single action button.
    pub fn show_message_with_action(
        &mut self,
        text: impl Into<String>,
        action_label: impl Into<String>,
        action: ActionKind,
    ) {
        self.notifier.show(Notice::with_action(text, action_label, action));
    }

    /// Explanation shown before re-requesting a declined permission.
    /// Its "OK" action issues the request.
    pub fn show_rationale(&mut self) {
        let text = self.messages.permission_rationale.clone();
        let label = self.messages.ok_action.clone();
        self.show_message_with_action(text, label, ActionKind::RequestPermissions);
    }

    /// Permanent-denial prompt whose action opens the app's settings screen.
    pub fn show_settings_prompt(&mut self) {
        let package = self.package.clone();
        let human = humanize_error(
            &LastfixError::PermissionDenied(package.clone()),
            &self.messages,
        );
        let label = self.messages.settings_action.clone();
        self.show_message_with_action(
            human.message,
            label,
            ActionKind::OpenAppSettings { package },
        );
    }

    /// Notice with the wording for `err`.
    ///
    /// Errors the user has to fix get the settings prompt; everything else
    /// is a plain message. Returns the severity that decided it.
    pub fn show_error(&mut self, err: &LastfixError) -> Severity {
        let human = humanize_error(err, &self.messages);
        match human.severity {
            Severity::ActionRequired => self.show_settings_prompt(),
            Severity::Transient | Severity::Permanent => self.show_message(human.message),
        }
        human.severity
    }

    /// Deep-link into the OS application-details screen for `package`.
    pub fn open_settings<P>(&self, package: &str, platform: &P) -> Result<()>
    where
        P: NativeSettings + ?Sized,
    {
        info!(package, "opening application settings");
        platform.open_app_settings(package).inspect_err(|e| {
            warn!(error = %e, package, "could not open application settings");
        })
    }
}
