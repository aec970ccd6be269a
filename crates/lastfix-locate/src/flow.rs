// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-screen location flow.
//
// Start → CheckingPermission → Fetching                (granted)
//                            → RequestingPermission    (not granted)
// RequestingPermission       → Fetching                (granted)
//                            → ShowingSettingsPrompt   (denied)
//
// Fetching and ShowingSettingsPrompt are terminal until the screen becomes
// visible again, which re-enters CheckingPermission. Every event is handled
// on the UI task; the only async step is the provider call, which the host
// runs from the `FetchRequest` returned by the event that entered `Fetching`.

use std::sync::Arc;

use lastfix_bridge::traits::PlatformBridge;
use lastfix_core::types::{ActionKind, PermissionResponse, PermissionState};
use lastfix_core::AppConfig;
use tracing::{debug, info, warn, Instrument, Span};

use crate::fetcher::{FetchAttempt, FetchOutcome, LocationDisplay, LocationFetcher};
use crate::gate::{PermissionGate, RequestOutcome};
use crate::presenter::{NotificationPresenter, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Start,
    CheckingPermission,
    RequestingPermission,
    Fetching,
    ShowingSettingsPrompt,
}

/// What the host must do after an event.
#[derive(Debug)]
pub enum FlowStep {
    /// Nothing; wait for the next event.
    Idle,
    /// Run this fetch and pass its result to [`LocationFlow::complete_fetch`].
    Fetch(FetchRequest),
}

/// A pending provider call, detached from the flow so the host can await it
/// without holding the flow.
pub struct FetchRequest {
    gate: PermissionGate,
    platform: Arc<dyn PlatformBridge>,
    span: Span,
}

impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("gate", &self.gate)
            .field("platform", &self.platform.platform_name())
            .finish()
    }
}

impl FetchRequest {
    pub async fn run(self) -> FetchAttempt {
        let span = self.span.clone();
        LocationFetcher::fetch_last(&self.gate, self.platform)
            .instrument(span)
            .await
    }
}

/// The screen's whole permission/location logic.
pub struct LocationFlow<N, D> {
    state: FlowState,
    gate: PermissionGate,
    fetcher: LocationFetcher,
    presenter: NotificationPresenter<N>,
    display: D,
    platform: Arc<dyn PlatformBridge>,
    /// A platform request is out and its answer has not arrived yet.
    request_pending: bool,
    span: Span,
}

impl<N: Notifier, D: LocationDisplay> LocationFlow<N, D> {
    /// `span` is the logging context for this screen; every event is
    /// recorded inside it.
    pub fn new(
        config: &AppConfig,
        platform: Arc<dyn PlatformBridge>,
        notifier: N,
        display: D,
        span: Span,
    ) -> Self {
        Self {
            state: FlowState::Start,
            gate: PermissionGate::from_config(config),
            fetcher: LocationFetcher::new(config.labels.clone()),
            presenter: NotificationPresenter::new(
                notifier,
                config.messages.clone(),
                config.package_id.clone(),
            ),
            display,
            platform,
            request_pending: false,
            span,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn presenter(&self) -> &NotificationPresenter<N> {
        &self.presenter
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn request_pending(&self) -> bool {
        self.request_pending
    }

    /// Screen became visible.
    ///
    /// Once the rationale has been shown on this screen, a later start does
    /// not ask again; it goes straight to the (guarded) fetch.
    pub fn on_start(&mut self) -> FlowStep {
        let span = self.span.clone();
        let _enter = span.enter();
        self.transition(FlowState::CheckingPermission);

        let granted = self.gate.check_granted(self.platform.as_ref()).is_granted();
        if granted || self.gate.rationale_shown() {
            return self.begin_fetch();
        }

        self.transition(FlowState::RequestingPermission);
        match self
            .gate
            .request_if_needed(self.platform.as_ref(), &mut self.presenter)
        {
            Ok(RequestOutcome::AlreadyGranted) => self.begin_fetch(),
            Ok(RequestOutcome::RationaleShown) => FlowStep::Idle,
            Ok(RequestOutcome::Requested) => {
                self.request_pending = true;
                FlowStep::Idle
            }
            Err(e) => {
                warn!(error = %e, "permission request could not be dispatched");
                self.show_settings_prompt();
                FlowStep::Idle
            }
        }
    }

    /// Screen became visible again after being hidden (back from the
    /// settings screen, window refocused).
    ///
    /// The permission dialog itself hides the screen, so a resume while its
    /// answer is outstanding is ignored.
    pub fn on_resume(&mut self) -> FlowStep {
        if self.request_pending {
            let _enter = self.span.enter();
            debug!("resumed while a permission request is pending, ignoring");
            return FlowStep::Idle;
        }
        self.on_start()
    }

    /// Platform answered a permission request.
    pub fn on_permission_result(&mut self, response: &PermissionResponse) -> FlowStep {
        let span = self.span.clone();
        let _enter = span.enter();
        info!("onRequestPermissionResult");
        self.request_pending = false;

        match self.gate.interpret_result(response, self.platform.as_ref()) {
            None => FlowStep::Idle,
            Some(PermissionState::Granted) => self.begin_fetch(),
            Some(PermissionState::Denied) => {
                self.show_settings_prompt();
                FlowStep::Idle
            }
        }
    }

    /// User tapped a notice's action button.
    pub fn on_notice_action(&mut self, action: &ActionKind) -> FlowStep {
        let span = self.span.clone();
        let _enter = span.enter();
        match action {
            ActionKind::RequestPermissions => {
                self.transition(FlowState::RequestingPermission);
                match self.gate.request(self.platform.as_ref()) {
                    Ok(()) => self.request_pending = true,
                    Err(e) => {
                        warn!(error = %e, "permission request could not be dispatched");
                        self.show_settings_prompt();
                    }
                }
            }
            ActionKind::OpenAppSettings { package } => {
                // Failure is already logged; the prompt stays up.
                let _ = self.presenter.open_settings(package, self.platform.as_ref());
            }
        }
        FlowStep::Idle
    }

    /// Show the result of a fetch started by an earlier event.
    pub fn complete_fetch(&mut self, attempt: FetchAttempt) -> FetchOutcome {
        let span = self.span.clone();
        let _enter = span.enter();
        let outcome = self
            .fetcher
            .deliver(attempt, &mut self.display, &mut self.presenter);
        match outcome {
            FetchOutcome::Skipped => {
                info!(
                    required = ?self.gate.required(),
                    "fetch skipped: not every required permission is granted"
                );
            }
            FetchOutcome::Denied => self.transition(FlowState::ShowingSettingsPrompt),
            FetchOutcome::Displayed(_) | FetchOutcome::Unavailable | FetchOutcome::Failed => {}
        }
        outcome
    }

    fn begin_fetch(&mut self) -> FlowStep {
        self.transition(FlowState::Fetching);
        FlowStep::Fetch(FetchRequest {
            gate: self.gate.clone(),
            platform: Arc::clone(&self.platform),
            span: self.span.clone(),
        })
    }

    fn show_settings_prompt(&mut self) {
        self.transition(FlowState::ShowingSettingsPrompt);
        self.presenter.show_settings_prompt();
    }

    fn transition(&mut self, next: FlowState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, "location flow transition");
            self.state = next;
        }
    }
}
