// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-side services for the demo shell.

pub mod console_toaster;
pub mod data_dir;
#[cfg(test)]
pub mod scripted_page;
#[cfg(feature = "webview")]
pub mod window;
