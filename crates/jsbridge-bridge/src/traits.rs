// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic seams between the controller and its two collaborators:
// the web surface that renders the page, and the shell that shows notices.

use jsbridge_core::error::Result;
use jsbridge_core::{BridgeConfig, Notice, ScriptValue};

/// Continuation for a script evaluation. Called at most once, on the UI
/// thread, after `evaluate` has returned.
pub type ResultCallback = Box<dyn FnOnce(ScriptValue) + 'static>;

/// An embedded browser engine hosting one page.
///
/// Methods take `&self`; implementations keep whatever per-surface state
/// they need behind interior mutability, like a platform view handle.
pub trait WebSurface {
    /// Human-readable backend name (e.g. "Android WebView").
    fn surface_name(&self) -> &str;

    /// Apply engine settings (script enabled, zoom controls).
    fn configure(&self, config: &BridgeConfig) -> Result<()>;

    /// Expose a native object under `name` in the page's global scope with
    /// the given script-callable methods. Calls come back through
    /// `BridgeController::dispatch_binding`.
    fn expose_binding(&self, name: &str, methods: &[String]) -> Result<()>;

    /// Start navigating to `url`.
    fn load_url(&self, url: &str) -> Result<()>;

    /// Run a `javascript:` URL in the current page. No result.
    fn load_javascript_url(&self, url: &str) -> Result<()>;

    /// Evaluate `script` in the current page. The call returns immediately;
    /// `on_result`, if given, later receives the engine's result.
    fn evaluate(&self, script: &str, on_result: Option<ResultCallback>) -> Result<()>;
}

/// The UI shell's transient notice channel (toasts).
pub trait NoticeSink {
    fn show_notice(&self, notice: &Notice);
}
