// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Delivery of asynchronous permission answers from the platform to the UI.
//
// The platform answers permission requests on its own callback (JNI export on
// Android). Those answers are pushed into a process-wide unbounded channel;
// the UI task takes the receiving half once and drains it.

use std::sync::{Mutex, OnceLock};

use lastfix_core::types::PermissionResponse;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

struct PermissionChannel {
    tx: UnboundedSender<PermissionResponse>,
    rx: Mutex<Option<UnboundedReceiver<PermissionResponse>>>,
}

fn channel() -> &'static PermissionChannel {
    static CHANNEL: OnceLock<PermissionChannel> = OnceLock::new();
    CHANNEL.get_or_init(|| {
        let (tx, rx) = mpsc::unbounded_channel();
        PermissionChannel {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    })
}

/// Push a platform answer to whoever holds the receiver.
///
/// Returns false if the receiver was dropped (screen gone); the answer is
/// discarded in that case.
pub fn deliver_permission_response(response: PermissionResponse) -> bool {
    match channel().tx.send(response) {
        Ok(()) => true,
        Err(_) => {
            tracing::debug!("permission response dropped: no receiver");
            false
        }
    }
}

/// Take the receiving half of the permission channel.
///
/// Only the first caller gets `Some`; there is a single UI consumer.
pub fn permission_results() -> Option<UnboundedReceiver<PermissionResponse>> {
    channel().rx.lock().ok()?.take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastfix_core::types::PermissionState;

    // One test only: the channel is process-wide and the receiver can be
    // taken once.
    #[tokio::test]
    async fn responses_reach_the_single_receiver() {
        let mut rx = permission_results().expect("receiver available");
        assert!(permission_results().is_none());

        let response = PermissionResponse::Legacy {
            request_code: 34,
            grants: vec![PermissionState::Granted],
        };
        assert!(deliver_permission_response(response.clone()));
        assert_eq!(rx.recv().await, Some(response));
    }
}
