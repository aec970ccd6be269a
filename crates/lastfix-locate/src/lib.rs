// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lastfix: the screen's location flow: permission gate, one-shot
// last-location fetch, and the notices shown along the way.

pub mod fetcher;
pub mod flow;
pub mod gate;
pub mod presenter;

#[cfg(test)]
mod testing;

pub use fetcher::{FetchAttempt, FetchOutcome, LocationDisplay, LocationFetcher};
pub use flow::{FetchRequest, FlowState, FlowStep, LocationFlow};
pub use gate::{PermissionGate, RequestOutcome};
pub use presenter::{NotificationPresenter, Notifier};
