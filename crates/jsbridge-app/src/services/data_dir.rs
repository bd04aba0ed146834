// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the shell keeps its config.

use std::path::PathBuf;

const APP_NAME: &str = "jsbridge";
const CONFIG_FILE: &str = "bridge.json";

/// Per-user config directory for the shell.
///
/// - Linux: `$XDG_CONFIG_HOME/jsbridge` (defaults to `~/.config/jsbridge`)
/// - macOS: `~/Library/Application Support/jsbridge`
/// - Windows: `%APPDATA%\jsbridge`
///
/// Falls back to the system temp dir when the platform has no notion of
/// one (e.g. `HOME` unset in a container).
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

/// Config file location: `$JSBRIDGE_CONFIG`, else `bridge.json` in
/// [`config_dir`].
pub fn config_path() -> PathBuf {
    match std::env::var_os("JSBRIDGE_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => config_dir().join(CONFIG_FILE),
    }
}
