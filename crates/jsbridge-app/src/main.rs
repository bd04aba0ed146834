// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// jsbridge demo shell.
//
// Entry point. Initialises logging, loads the bridge config, and drives a
// page in a desktop WebView window through the bridge. See `cli.rs` for the
// accepted steps.

mod cli;
mod services;
mod shell;

use jsbridge_core::BridgeConfig;
use jsbridge_core::error::Result;

use services::data_dir;
use shell::Step;

fn main() {
    let args = cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("jsbridge starting");

    let config_path = args.config.clone().unwrap_or_else(data_dir::config_path);
    let mut config = BridgeConfig::load_or_default(&config_path);
    if let Some(url) = &args.url {
        config.start_url = url.clone();
    }
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, path = %config_path.display(), "invalid config");
        std::process::exit(1);
    }
    tracing::info!(path = %config_path.display(), prefix = %config.message_prefix, "config loaded");

    let steps = if args.steps.is_empty() {
        Step::demo()
    } else {
        args.steps.clone()
    };

    match run(config, steps, args.exit_after_steps) {
        Ok(notices) => tracing::info!(notices, "jsbridge finished"),
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "webview")]
fn run(config: BridgeConfig, steps: Vec<Step>, exit_after_steps: bool) -> Result<usize> {
    services::window::run(config, steps, exit_after_steps)
}

#[cfg(not(feature = "webview"))]
fn run(_config: BridgeConfig, _steps: Vec<Step>, _exit_after_steps: bool) -> Result<usize> {
    // Built without a browser engine.
    Err(jsbridge_core::error::BridgeError::PlatformUnavailable)
}
