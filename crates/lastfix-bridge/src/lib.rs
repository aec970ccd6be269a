// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lastfix: native platform bridge abstractions.
//
// Defines the capability traits the location flow needs (permissions, last
// known location, settings deep link) and picks the implementation for the
// target OS. Android goes through JNI; every other target gets a stub so the
// workspace builds and tests on desktop and CI.

pub mod callbacks;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use callbacks::{deliver_permission_response, permission_results};

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        Box::new(stub::StubBridge)
    }
}
