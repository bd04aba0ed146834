// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal stand-in for the shell's toast widget.

use std::cell::Cell;

use jsbridge_bridge::NoticeSink;
use jsbridge_core::{Notice, NoticeDuration};

/// Prints notices to stdout and counts them.
#[derive(Debug, Default)]
pub struct ConsoleToaster {
    shown: Cell<usize>,
}

impl ConsoleToaster {
    pub fn shown(&self) -> usize {
        self.shown.get()
    }
}

impl NoticeSink for ConsoleToaster {
    fn show_notice(&self, notice: &Notice) {
        self.shown.set(self.shown.get() + 1);
        let tag = match notice.duration {
            NoticeDuration::Short => "toast",
            NoticeDuration::Long => "toast:long",
        };
        tracing::info!(text = %notice.text, "notice shown");
        println!("[{tag}] {}", notice.text);
    }
}
