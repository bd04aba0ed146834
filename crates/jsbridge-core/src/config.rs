// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Settings for one bridge controller and its demo page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Page loaded into the surface on start.
    pub start_url: String,
    /// Navigation targets starting with this are bridge messages.
    pub message_prefix: String,
    /// Global name the native binding object is exposed under.
    pub binding_name: String,
    /// Enable the page's script engine.
    pub javascript_enabled: bool,
    /// Show the surface's built-in zoom controls.
    pub display_zoom_controls: bool,
    /// Fire-and-forget scripts go through a `javascript:` URL load instead
    /// of an evaluation without callback.
    pub legacy_execute: bool,
    /// Notice shown when a script trigger fires before the page is ready.
    pub page_loading_notice: String,
    /// Prepended to strings received from the page before they are shown.
    pub received_notice_prefix: String,
    /// Argument passed to the page's `alertMessage` function.
    pub alert_argument: String,
    /// Argument passed to the page's `getResult` function.
    pub result_argument: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            start_url: "http://cashow.github.io/html/android_webview".into(),
            message_prefix: "jstag://".into(),
            binding_name: "androidtag".into(),
            javascript_enabled: true,
            display_zoom_controls: false,
            legacy_execute: true,
            page_loading_notice: "The page is still loading".into(),
            received_notice_prefix: "Received string from page: ".into(),
            alert_argument: "hello from java".into(),
            result_argument: "hahaha".into(),
        }
    }
}

impl BridgeConfig {
    /// Read a JSON config file. Missing keys take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`BridgeConfig::load`], but falls back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(BridgeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.message_prefix.is_empty() {
            // An empty prefix would capture every navigation.
            return Err(BridgeError::Config("message_prefix must not be empty".into()));
        }
        if self.binding_name.is_empty() {
            return Err(BridgeError::Config("binding_name must not be empty".into()));
        }
        Ok(())
    }
}
