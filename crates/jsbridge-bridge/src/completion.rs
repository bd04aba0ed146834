// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-shot completion handle for script evaluation results.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use jsbridge_core::ScriptValue;
use jsbridge_core::error::{BridgeError, Result};

use crate::traits::ResultCallback;

/// Resolves once with the value of an evaluated script.
///
/// Fails with [`BridgeError::ResultDropped`] if the surface discarded the
/// continuation without calling it (for example, the view was destroyed).
/// There is no timeout: a script that never answers leaves this pending.
#[derive(Debug)]
pub struct ScriptResult {
    rx: oneshot::Receiver<ScriptValue>,
}

impl ScriptResult {
    /// Poll without waiting: `None` while the script has not answered.
    pub fn try_take(&mut self) -> Option<Result<ScriptValue>> {
        match self.rx.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(BridgeError::ResultDropped)),
        }
    }
}

impl Future for ScriptResult {
    type Output = Result<ScriptValue>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.map_err(|_| BridgeError::ResultDropped))
    }
}

/// A continuation to hand to the surface, paired with the future it fulfils.
pub(crate) fn channel() -> (ResultCallback, ScriptResult) {
    let (tx, rx) = oneshot::channel();
    let callback: ResultCallback = Box::new(move |value| {
        // The receiver may be gone if the caller stopped waiting.
        let _ = tx.send(value);
    });
    (callback, ScriptResult { rx })
}
