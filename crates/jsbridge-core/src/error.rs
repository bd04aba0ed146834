// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
///
/// Only [`BridgeError::PageNotReady`] is expected during normal use; the
/// controller turns it into a notice instead of returning it. The other
/// variants describe wiring or platform failures that the host glue sees.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Page lifecycle --
    #[error("page has not finished loading")]
    PageNotReady,

    // -- Exposed bindings --
    #[error("bindings are sealed once content starts loading")]
    BindingsSealed,

    #[error("binding method already registered: {0}")]
    DuplicateBinding(String),

    #[error("no binding {object}.{method}")]
    UnknownBinding { object: String, method: String },

    // -- Script evaluation --
    #[error("script result callback was dropped before it ran")]
    ResultDropped,

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform surface --
    #[error("web surface error: {0}")]
    Surface(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
