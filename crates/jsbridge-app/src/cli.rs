// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::PathBuf;

use clap::Parser;

use crate::shell::Step;

/// Drive a WebView page through the JavaScript bridge.
///
/// Steps run in order once the window is up; with none, the built-in demo
/// runs. The window stays open afterwards for the page to be used by hand.
#[derive(Parser, Debug)]
#[command(name = "jsbridge", version, about)]
pub struct Args {
    /// Steps: load[:url] alert result link:<url> call:<text> eval:<expr>
    pub steps: Vec<Step>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start page override.
    #[arg(long)]
    pub url: Option<String>,

    /// Close the window once every step has run.
    #[arg(long)]
    pub exit_after_steps: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
