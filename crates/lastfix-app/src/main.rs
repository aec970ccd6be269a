// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lastfix: last known location sample.
//
// Entry point. Initialises logging and backend services, then launches the
// Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::home::Home;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("lastfix starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => {
            tracing::info!(data_dir = ?s.data_dir(), "backend services initialised");
            s
        }
        Err(e) => {
            tracing::error!(error = %e, "data directory unusable, using defaults");
            AppServices::fallback()
        }
    });

    use_context_provider(|| svc.clone());

    rsx! {
        Home {}
    }
}
