// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Events a surface raises for the UI thread to hand to the controller.

use std::sync::{Arc, Mutex};

/// Something the page or engine did, queued until the host's next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    PageStarted(String),
    PageFinished(String),
    /// Navigation to a prefixed URL; the engine has already cancelled it.
    Intercepted(String),
    /// Page script called `<object>.<method>(arg)` on an exposed binding.
    BindingCall {
        object: String,
        method: String,
        arg: String,
    },
    /// An evaluation the surface holds a continuation for has answered.
    ScriptResult { request: u64, raw: String },
}

/// Shared, thread-safe event sink. Engine callbacks may fire off the UI
/// thread, so pushes go through a mutex and the host drains on its own turn.
#[derive(Debug, Clone, Default)]
pub struct EventQueue(Arc<Mutex<Vec<SurfaceEvent>>>);

impl EventQueue {
    pub fn push(&self, event: SurfaceEvent) {
        match self.0.lock() {
            Ok(mut events) => events.push(event),
            Err(_) => tracing::warn!(?event, "event queue poisoned, event dropped"),
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<SurfaceEvent> {
        match self.0.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}
