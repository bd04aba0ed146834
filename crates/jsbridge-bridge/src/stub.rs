// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub surface for desktop/CI builds where no embedded browser engine is
// available.
//
// Every method returns `PlatformUnavailable`; the real implementation lives
// in the `android` module.

use jsbridge_core::BridgeConfig;
use jsbridge_core::error::{BridgeError, Result};

use crate::traits::{ResultCallback, WebSurface};

/// No-op surface returned on platforms without a WebView backend.
pub struct StubSurface;

impl WebSurface for StubSurface {
    fn surface_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn configure(&self, _config: &BridgeConfig) -> Result<()> {
        tracing::warn!("WebSurface::configure called on stub surface");
        Err(BridgeError::PlatformUnavailable)
    }

    fn expose_binding(&self, name: &str, _methods: &[String]) -> Result<()> {
        tracing::warn!(name, "WebSurface::expose_binding called on stub surface");
        Err(BridgeError::PlatformUnavailable)
    }

    fn load_url(&self, url: &str) -> Result<()> {
        tracing::warn!(url, "WebSurface::load_url called on stub surface");
        Err(BridgeError::PlatformUnavailable)
    }

    fn load_javascript_url(&self, _url: &str) -> Result<()> {
        tracing::warn!("WebSurface::load_javascript_url called on stub surface");
        Err(BridgeError::PlatformUnavailable)
    }

    fn evaluate(&self, _script: &str, _on_result: Option<ResultCallback>) -> Result<()> {
        tracing::warn!("WebSurface::evaluate called on stub surface");
        Err(BridgeError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_call_is_unavailable() {
        let surface = StubSurface;
        assert!(matches!(
            surface.configure(&BridgeConfig::default()),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            surface.expose_binding("androidtag", &["showMessage".into()]),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            surface.load_url("about:blank"),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            surface.evaluate("1", None),
            Err(BridgeError::PlatformUnavailable)
        ));
    }

    #[test]
    fn platform_surface_is_the_stub() {
        let surface = crate::platform_surface().expect("surface");
        assert_eq!(surface.surface_name(), "Desktop (stub)");
    }
}
