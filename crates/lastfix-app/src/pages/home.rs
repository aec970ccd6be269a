// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: the two coordinate labels and the snackbar.

use std::time::Duration;

use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::use_wry_event_handler;
use dioxus::prelude::*;
use lastfix_core::types::{ActionKind, Notice, NoticeAction, NoticeDuration};
use lastfix_locate::{FlowStep, LocationFlow};

use crate::services::app_services::AppServices;
use crate::state::{CoordinateTexts, ScreenFlow, SignalDisplay, SignalNotifier};

/// How long a `NoticeDuration::Long` snackbar stays up.
const LONG_NOTICE: Duration = Duration::from_millis(2750);

/// Run the fetch a flow event asked for and show its result.
async fn run_step(mut flow: Signal<ScreenFlow>, step: FlowStep) {
    if let FlowStep::Fetch(request) = step {
        let attempt = request.run().await;
        flow.write().complete_fetch(attempt);
    }
}

#[component]
pub fn Home() -> Element {
    let svc = use_context::<AppServices>();
    let mut notice = use_signal(|| None::<Notice>);
    let coords = use_signal(CoordinateTexts::default);

    let mut flow = use_signal(move || {
        LocationFlow::new(
            svc.config(),
            svc.bridge(),
            SignalNotifier(notice),
            SignalDisplay(coords),
            tracing::info_span!("location_flow", screen = "home"),
        )
    });

    // Screen start, then every permission answer for the life of the screen.
    use_future(move || async move {
        let step = flow.write().on_start();
        run_step(flow, step).await;

        let Some(mut results) = lastfix_bridge::permission_results() else {
            tracing::warn!("permission results already taken; answers will not reach this screen");
            return;
        };
        while let Some(response) = results.recv().await {
            let step = flow.write().on_permission_result(&response);
            run_step(flow, step).await;
        }
    });

    // Visible again after being hidden (back from the settings screen, app
    // resumed, window refocused): run the start check again.
    let mut hidden = false;
    use_wry_event_handler(move |event, _| {
        let visible = match event {
            Event::Resumed => true,
            Event::Suspended => false,
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => *focused,
            _ => return,
        };
        if !visible {
            hidden = true;
        } else if std::mem::take(&mut hidden) {
            tracing::debug!("screen visible again");
            spawn(async move {
                let step = flow.write().on_resume();
                run_step(flow, step).await;
            });
        }
    });

    // Long notices dismiss themselves unless replaced first.
    use_effect(move || {
        let current = notice.read().clone();
        if let Some(shown) = current.filter(|n| n.duration == NoticeDuration::Long) {
            spawn(async move {
                tokio::time::sleep(LONG_NOTICE).await;
                if notice.peek().as_ref() == Some(&shown) {
                    notice.set(None);
                }
            });
        }
    });

    let texts = coords.read().clone();

    rsx! {
        div { id: "main_activity_container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            div { style: "flex: 1; padding: 16px;",
                h1 { "lastfix" }
                p { style: "color: #666;", "Last known location" }
                p { id: "latitude_text", style: "font-size: 18px; margin: 12px 0;", "{texts.latitude}" }
                p { id: "longitude_text", style: "font-size: 18px; margin: 12px 0;", "{texts.longitude}" }
            }

            if let Some(current) = notice.read().clone() {
                Snackbar {
                    notice: current,
                    on_action: move |kind: ActionKind| {
                        notice.set(None);
                        let step = flow.write().on_notice_action(&kind);
                        spawn(run_step(flow, step));
                    },
                }
            }
        }
    }
}

/// Bottom banner with an optional single action button.
#[component]
fn Snackbar(notice: Notice, on_action: EventHandler<ActionKind>) -> Element {
    rsx! {
        div { class: "snackbar",
            style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 14px 16px; background: #323232; color: white;",
            span { "{notice.text}" }
            if let Some(NoticeAction { label, kind }) = notice.action.clone() {
                button {
                    style: "background: none; border: none; color: #bb86fc; font-weight: 600; text-transform: uppercase;",
                    onclick: move |_| {
                        tracing::info!(?kind, "snackbar action tapped");
                        on_action.call(kind.clone());
                    },
                    "{label}"
                }
            }
        }
    }
}
