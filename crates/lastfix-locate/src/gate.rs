// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Permission gate. Decides whether the screen may read the location, and
// asks for the permissions when it may not.
//
// The gate is configured with a declarative list of required permissions.
// It is granted only when every one of them is granted.

use lastfix_bridge::traits::NativePermissions;
use lastfix_core::error::Result;
use lastfix_core::types::{Permission, PermissionResponse, PermissionState, RequestStyle};
use lastfix_core::AppConfig;
use tracing::{debug, info, warn};

use crate::presenter::{NotificationPresenter, Notifier};

/// What `request_if_needed` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Everything was already granted; nothing shown, nothing requested.
    AlreadyGranted,
    /// The rationale notice is up; the request waits for its action.
    RationaleShown,
    /// The platform dialog was dispatched.
    Requested,
}

/// Grant checks and requests for one screen's permission list.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    required: Vec<Permission>,
    style: RequestStyle,
    request_code: i32,
    rationale_shown: bool,
}

impl PermissionGate {
    pub fn new(required: Vec<Permission>, style: RequestStyle, request_code: i32) -> Self {
        Self {
            required,
            style,
            request_code,
            rationale_shown: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.required_permissions(),
            config.request_style,
            config.request_code,
        )
    }

    pub fn required(&self) -> &[Permission] {
        &self.required
    }

    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    /// Whether the rationale has been shown in this screen instance.
    pub fn rationale_shown(&self) -> bool {
        self.rationale_shown
    }

    /// Granted only if every required permission is granted.
    ///
    /// A platform error while checking counts as denied.
    pub fn check_granted<P>(&self, platform: &P) -> PermissionState
    where
        P: NativePermissions + ?Sized,
    {
        for &permission in &self.required {
            match platform.check_permission(permission) {
                Ok(PermissionState::Granted) => {
                    debug!(%permission, "permission granted");
                }
                Ok(PermissionState::Denied) => {
                    debug!(%permission, "permission denied");
                    return PermissionState::Denied;
                }
                Err(e) => {
                    warn!(%permission, error = %e, "permission check failed, treating as denied");
                    return PermissionState::Denied;
                }
            }
        }
        PermissionState::Granted
    }

    /// Whether the platform wants an explanation before asking again, for
    /// any of the required permissions.
    pub fn should_show_rationale<P>(&self, platform: &P) -> bool
    where
        P: NativePermissions + ?Sized,
    {
        self.required.iter().any(|&permission| {
            platform
                .should_show_rationale(permission)
                .unwrap_or_else(|e| {
                    warn!(%permission, error = %e, "rationale query failed");
                    false
                })
        })
    }

    /// Ask for the permissions unless they are already granted.
    ///
    /// If the user declined before (without "never ask again"), the rationale
    /// notice is shown instead and the request waits for its action.
    pub fn request_if_needed<P, N>(
        &mut self,
        platform: &P,
        presenter: &mut NotificationPresenter<N>,
    ) -> Result<RequestOutcome>
    where
        P: NativePermissions + ?Sized,
        N: Notifier,
    {
        if self.check_granted(platform).is_granted() {
            return Ok(RequestOutcome::AlreadyGranted);
        }

        if self.should_show_rationale(platform) {
            info!("displaying permission rationale to provide additional context");
            presenter.show_rationale();
            self.rationale_shown = true;
            return Ok(RequestOutcome::RationaleShown);
        }

        info!("requesting permission");
        self.request(platform)?;
        Ok(RequestOutcome::Requested)
    }

    /// Dispatch the platform request in the configured style.
    pub fn request<P>(&self, platform: &P) -> Result<()>
    where
        P: NativePermissions + ?Sized,
    {
        match self.style {
            RequestStyle::Legacy => platform.request_permissions(&self.required, self.request_code),
            RequestStyle::Launcher => platform.launch_permission_request(&self.required),
        }
    }

    /// Turn a platform answer into a grant decision.
    ///
    /// `None` means "no decision": the answer belongs to another request,
    /// came in the wrong style, or the user interrupted the dialog (empty
    /// result). None of those change any state or show anything.
    pub fn interpret_result<P>(
        &self,
        response: &PermissionResponse,
        platform: &P,
    ) -> Option<PermissionState>
    where
        P: NativePermissions + ?Sized,
    {
        match (self.style, response) {
            (
                RequestStyle::Legacy,
                PermissionResponse::Legacy {
                    request_code,
                    grants,
                },
            ) => {
                if *request_code != self.request_code {
                    debug!(
                        request_code,
                        expected = self.request_code,
                        "ignoring foreign request code"
                    );
                    return None;
                }
                match grants.first() {
                    None => {
                        info!("user interaction was cancelled");
                        None
                    }
                    Some(state) => Some(*state),
                }
            }
            (RequestStyle::Launcher, PermissionResponse::Launcher { results }) => {
                if results.is_empty() {
                    info!("user interaction was cancelled");
                    return None;
                }
                Some(self.check_granted(platform))
            }
            (style, _) => {
                warn!(?style, "permission response does not match request style, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::testing::{FakePlatform, RecordingNotifier};
    use lastfix_core::config::Messages;
    use lastfix_core::types::ActionKind;

    fn coarse_gate() -> PermissionGate {
        PermissionGate::new(vec![Permission::CoarseLocation], RequestStyle::Legacy, 34)
    }

    fn presenter() -> NotificationPresenter<RecordingNotifier> {
        NotificationPresenter::new(
            RecordingNotifier::default(),
            Messages::default(),
            "dev.lastfix.app",
        )
    }

    #[test]
    fn granted_only_when_all_granted() {
        let gate = PermissionGate::new(
            vec![Permission::CoarseLocation, Permission::BackgroundLocation],
            RequestStyle::Legacy,
            34,
        );
        let platform = FakePlatform::granted();
        platform.set_state(Permission::BackgroundLocation, PermissionState::Denied);
        assert_eq!(gate.check_granted(&platform), PermissionState::Denied);

        platform.set_state(Permission::BackgroundLocation, PermissionState::Granted);
        assert_eq!(gate.check_granted(&platform), PermissionState::Granted);
    }

    #[test]
    fn check_error_counts_as_denied() {
        let platform = FakePlatform::granted();
        platform.fail_checks();
        assert_eq!(coarse_gate().check_granted(&platform), PermissionState::Denied);
    }

    #[test]
    fn already_granted_requests_nothing() {
        let mut gate = coarse_gate();
        let mut p = presenter();
        let platform = FakePlatform::granted();
        assert_eq!(
            gate.request_if_needed(&platform, &mut p).unwrap(),
            RequestOutcome::AlreadyGranted
        );
        assert!(platform.requests().is_empty());
        assert!(p.notifier().notices().is_empty());
    }

    #[test]
    fn rationale_is_shown_before_any_request() {
        let mut gate = coarse_gate();
        let mut p = presenter();
        let platform = FakePlatform::denied();
        platform.set_rationale(true);

        let outcome = gate.request_if_needed(&platform, &mut p).unwrap();
        assert_eq!(outcome, RequestOutcome::RationaleShown);
        assert!(gate.rationale_shown());
        assert!(platform.requests().is_empty());
        assert_eq!(
            p.notifier().notices()[0].action.as_ref().unwrap().kind,
            ActionKind::RequestPermissions
        );
    }

    #[test]
    fn without_rationale_request_is_immediate() {
        let mut gate = coarse_gate();
        let mut p = presenter();
        let platform = FakePlatform::denied();

        let outcome = gate.request_if_needed(&platform, &mut p).unwrap();
        assert_eq!(outcome, RequestOutcome::Requested);
        assert_eq!(platform.requests(), vec![(vec![Permission::CoarseLocation], Some(34))]);
        assert!(p.notifier().notices().is_empty());
    }

    #[test]
    fn launcher_style_uses_launcher() {
        let gate = PermissionGate::new(
            vec![Permission::CoarseLocation, Permission::BackgroundLocation],
            RequestStyle::Launcher,
            34,
        );
        let platform = FakePlatform::denied();
        gate.request(&platform).unwrap();
        assert_eq!(
            platform.requests(),
            vec![(
                vec![Permission::CoarseLocation, Permission::BackgroundLocation],
                None
            )]
        );
    }

    #[test]
    fn empty_result_is_no_decision() {
        let response = PermissionResponse::Legacy {
            request_code: 34,
            grants: Vec::new(),
        };
        assert_eq!(
            coarse_gate().interpret_result(&response, &FakePlatform::denied()),
            None
        );
    }

    #[test]
    fn first_grant_decides() {
        let gate = coarse_gate();
        let platform = FakePlatform::denied();
        let granted = PermissionResponse::Legacy {
            request_code: 34,
            grants: vec![PermissionState::Granted, PermissionState::Denied],
        };
        let denied = PermissionResponse::Legacy {
            request_code: 34,
            grants: vec![PermissionState::Denied],
        };
        assert_eq!(gate.interpret_result(&granted, &platform), Some(PermissionState::Granted));
        assert_eq!(gate.interpret_result(&denied, &platform), Some(PermissionState::Denied));
    }

    #[test]
    fn foreign_request_code_is_ignored() {
        let response = PermissionResponse::Legacy {
            request_code: 7,
            grants: vec![PermissionState::Granted],
        };
        assert_eq!(
            coarse_gate().interpret_result(&response, &FakePlatform::granted()),
            None
        );
    }

    #[test]
    fn launcher_result_rechecks_platform() {
        let gate =
            PermissionGate::new(vec![Permission::CoarseLocation], RequestStyle::Launcher, 34);
        let platform = FakePlatform::denied();
        let mut results = BTreeMap::new();
        results.insert(Permission::CoarseLocation, true);
        let response = PermissionResponse::Launcher { results };

        assert_eq!(gate.interpret_result(&response, &platform), Some(PermissionState::Denied));
        platform.set_state(Permission::CoarseLocation, PermissionState::Granted);
        assert_eq!(gate.interpret_result(&response, &platform), Some(PermissionState::Granted));
    }

    #[test]
    fn mismatched_style_is_ignored() {
        let response = PermissionResponse::Launcher {
            results: BTreeMap::new(),
        };
        assert_eq!(
            coarse_gate().interpret_result(&response, &FakePlatform::granted()),
            None
        );
    }
}
