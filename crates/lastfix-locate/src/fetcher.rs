// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot last-known-location fetch.
//
// The fetch is split in two halves so the UI never holds a borrow across the
// provider call: `fetch_last` runs the guarded provider call on the blocking
// pool, `deliver` applies the answer to the labels and notices. Single
// attempt, no retry, no timeout.

use std::sync::Arc;

use lastfix_bridge::traits::PlatformBridge;
use lastfix_core::error::{LastfixError, Result};
use lastfix_core::human_errors::Severity;
use lastfix_core::types::{LocationSample, UiLabels};
use tracing::{info, warn};

use crate::gate::PermissionGate;
use crate::presenter::{NotificationPresenter, Notifier};

/// The two coordinate labels on screen. Implemented by the UI layer.
pub trait LocationDisplay {
    fn set_coordinates(&mut self, latitude: String, longitude: String);
}

/// Raw result of a fetch, before it is shown.
#[derive(Debug)]
pub enum FetchAttempt {
    /// Permissions were no longer granted; the provider was not called.
    Skipped,
    /// The provider answered (or failed).
    Completed(Result<Option<LocationSample>>),
}

/// What the user ended up seeing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchOutcome {
    Skipped,
    Displayed(LocationSample),
    Unavailable,
    Failed,
    /// The provider refused for lack of permission; the settings prompt is up.
    Denied,
}

/// Formats and shows last-known-location readings.
#[derive(Debug, Clone)]
pub struct LocationFetcher {
    labels: UiLabels,
}

impl LocationFetcher {
    pub fn new(labels: UiLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &UiLabels {
        &self.labels
    }

    /// Ask the provider for its last known location.
    ///
    /// Permissions are re-checked right before the call; if any was revoked
    /// in the meantime the provider is not touched.
    pub async fn fetch_last(
        gate: &PermissionGate,
        platform: Arc<dyn PlatformBridge>,
    ) -> FetchAttempt {
        if !gate.check_granted(platform.as_ref()).is_granted() {
            info!("permissions not granted at fetch time, skipping");
            return FetchAttempt::Skipped;
        }

        let result = tokio::task::spawn_blocking(move || platform.last_location())
            .await
            .unwrap_or_else(|e| Err(LastfixError::ProviderFailure(format!("provider task: {e}"))));
        FetchAttempt::Completed(result)
    }

    /// Apply a fetch result to the screen.
    pub fn deliver<D, N>(
        &self,
        attempt: FetchAttempt,
        display: &mut D,
        presenter: &mut NotificationPresenter<N>,
    ) -> FetchOutcome
    where
        D: LocationDisplay + ?Sized,
        N: Notifier,
    {
        match attempt {
            FetchAttempt::Skipped => FetchOutcome::Skipped,
            FetchAttempt::Completed(Ok(Some(sample))) => {
                let (latitude, longitude) = self.format(&sample);
                info!(%latitude, %longitude, "last location displayed");
                display.set_coordinates(latitude, longitude);
                FetchOutcome::Displayed(sample)
            }
            FetchAttempt::Completed(Ok(None)) => {
                info!("provider has no last known location");
                presenter.show_error(&LastfixError::LocationUnavailable);
                FetchOutcome::Unavailable
            }
            FetchAttempt::Completed(Err(e)) => {
                warn!(error = %e, "getLastLocation failed");
                match presenter.show_error(&e) {
                    Severity::ActionRequired => FetchOutcome::Denied,
                    Severity::Transient | Severity::Permanent => FetchOutcome::Failed,
                }
            }
        }
    }

    /// Label texts for `sample`, e.g. `"Latitude: 37.421900"`.
    pub fn format(&self, sample: &LocationSample) -> (String, String) {
        (
            format!("{}: {:.6}", self.labels.latitude, sample.latitude),
            format!("{}: {:.6}", self.labels.longitude, sample.longitude),
        )
    }
}
