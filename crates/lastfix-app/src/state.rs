// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen state: reactive signals the location flow writes into.

use dioxus::prelude::*;
use lastfix_core::types::Notice;
use lastfix_locate::{LocationDisplay, LocationFlow, Notifier};

/// Texts of the two coordinate labels. Empty until the first fix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTexts {
    pub latitude: String,
    pub longitude: String,
}

/// Snackbar surface backed by a signal; `None` means nothing on screen.
#[derive(Clone, Copy)]
pub struct SignalNotifier(pub Signal<Option<Notice>>);

impl Notifier for SignalNotifier {
    fn show(&mut self, notice: Notice) {
        self.0.set(Some(notice));
    }
}

/// Coordinate labels backed by a signal.
#[derive(Clone, Copy)]
pub struct SignalDisplay(pub Signal<CoordinateTexts>);

impl LocationDisplay for SignalDisplay {
    fn set_coordinates(&mut self, latitude: String, longitude: String) {
        self.0.set(CoordinateTexts {
            latitude,
            longitude,
        });
    }
}

/// The flow as wired into the Dioxus screen.
pub type ScreenFlow = LocationFlow<SignalNotifier, SignalDisplay>;
