// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for lastfix.

use thiserror::Error;

/// Top-level error type for all lastfix operations.
#[derive(Debug, Error)]
pub enum LastfixError {
    // -- Location flow --
    #[error("location permission denied: {0}")]
    PermissionDenied(String),

    #[error("no last known location available")]
    LocationUnavailable,

    #[error("location provider failed: {0}")]
    ProviderFailure(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LastfixError>;
