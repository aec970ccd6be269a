// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted platform and recording UI doubles for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lastfix_bridge::traits::*;
use lastfix_core::error::{LastfixError, Result};
use lastfix_core::types::{LocationSample, Notice, Permission, PermissionState};

use crate::fetcher::LocationDisplay;
use crate::presenter::Notifier;

enum LocationScript {
    Answer(Option<LocationSample>),
    Fail(String),
    Refuse,
}

/// Platform whose answers are set by the test.
pub struct FakePlatform {
    default_state: PermissionState,
    states: Mutex<BTreeMap<Permission, PermissionState>>,
    rationale: Mutex<bool>,
    check_fails: Mutex<bool>,
    location: Mutex<LocationScript>,
    location_calls: AtomicUsize,
    requests: Mutex<Vec<(Vec<Permission>, Option<i32>)>>,
    settings: Mutex<Vec<String>>,
}

impl FakePlatform {
    fn with_default(default_state: PermissionState) -> Self {
        Self {
            default_state,
            states: Mutex::new(BTreeMap::new()),
            rationale: Mutex::new(false),
            check_fails: Mutex::new(false),
            location: Mutex::new(LocationScript::Answer(None)),
            location_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            settings: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::with_default(PermissionState::Granted)
    }

    pub fn denied() -> Self {
        Self::with_default(PermissionState::Denied)
    }

    pub fn set_state(&self, permission: Permission, state: PermissionState) {
        self.states.lock().unwrap().insert(permission, state);
    }

    pub fn set_rationale(&self, show: bool) {
        *self.rationale.lock().unwrap() = show;
    }

    pub fn fail_checks(&self) {
        *self.check_fails.lock().unwrap() = true;
    }

    pub fn answer_location(&self, sample: Option<LocationSample>) {
        *self.location.lock().unwrap() = LocationScript::Answer(sample);
    }

    pub fn fail_location(&self, detail: &str) {
        *self.location.lock().unwrap() = LocationScript::Fail(detail.to_string());
    }

    /// Provider throws as if the permission was pulled mid-call.
    pub fn refuse_location(&self) {
        *self.location.lock().unwrap() = LocationScript::Refuse;
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    /// Every dispatched request: permissions and legacy request code
    /// (`None` for launcher-style requests).
    pub fn requests(&self) -> Vec<(Vec<Permission>, Option<i32>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn opened_settings(&self) -> Vec<String> {
        self.settings.lock().unwrap().clone()
    }
}

impl PlatformBridge for FakePlatform {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl NativePermissions for FakePlatform {
    fn check_permission(&self, permission: Permission) -> Result<PermissionState> {
        if *self.check_fails.lock().unwrap() {
            return Err(LastfixError::Bridge("checkSelfPermission: boom".into()));
        }
        Ok(self
            .states
            .lock()
            .unwrap()
            .get(&permission)
            .copied()
            .unwrap_or(self.default_state))
    }

    fn should_show_rationale(&self, _permission: Permission) -> Result<bool> {
        Ok(*self.rationale.lock().unwrap())
    }

    fn request_permissions(&self, permissions: &[Permission], request_code: i32) -> Result<()> {
        self.requests
            .lock()
            .unwrap()
            .push((permissions.to_vec(), Some(request_code)));
        Ok(())
    }

    fn launch_permission_request(&self, permissions: &[Permission]) -> Result<()> {
        self.requests.lock().unwrap().push((permissions.to_vec(), None));
        Ok(())
    }
}

impl NativeLocation for FakePlatform {
    fn last_location(&self) -> Result<Option<LocationSample>> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        match &*self.location.lock().unwrap() {
            LocationScript::Answer(sample) => Ok(*sample),
            LocationScript::Fail(detail) => Err(LastfixError::ProviderFailure(detail.clone())),
            LocationScript::Refuse => {
                Err(LastfixError::PermissionDenied("getLastLocation".into()))
            }
        }
    }
}

impl NativeSettings for FakePlatform {
    fn open_app_settings(&self, package: &str) -> Result<()> {
        self.settings.lock().unwrap().push(package.to_string());
        Ok(())
    }
}

/// Notifier that keeps every notice it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Notifier for RecordingNotifier {
    fn show(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Display that records the label texts it was given.
#[derive(Default)]
pub struct RecordingDisplay {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub updates: usize,
}

impl LocationDisplay for RecordingDisplay {
    fn set_coordinates(&mut self, latitude: String, longitude: String) {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.updates += 1;
    }
}
