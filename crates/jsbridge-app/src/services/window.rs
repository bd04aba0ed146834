// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop host: a tao window holding a wry page, and the event loop that
// turns the shell.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::window::WindowBuilder;

use jsbridge_bridge::SurfaceEvent;
use jsbridge_bridge::desktop::WrySurface;
use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{BridgeConfig, ScriptInvocation};

use crate::shell::{PageHost, Shell, Step};

/// How often the loop wakes to drain engine events when idle.
const TURN_INTERVAL: Duration = Duration::from_millis(16);

impl PageHost for WrySurface {
    fn drain_events(&self) -> Vec<SurfaceEvent> {
        WrySurface::drain_events(self)
    }

    fn complete(&self, request: u64, raw: String) {
        WrySurface::complete(self, request, raw)
    }

    fn click_link(&self, url: &str) -> Result<()> {
        self.run_in_page(&ScriptInvocation::call("window.location.assign", &[url]).to_script())
    }

    fn call_binding(&self, object: &str, method: &str, arg: &str) -> Result<()> {
        let function = format!("window.{object}.{method}");
        self.run_in_page(&ScriptInvocation::call(&function, &[arg]).to_script())
    }
}

/// Open the window, run `steps`, then keep the page up until the user
/// closes it (or at once, with `exit_after_steps`). Returns the number of
/// notices shown.
pub fn run(config: BridgeConfig, steps: Vec<Step>, exit_after_steps: bool) -> Result<usize> {
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("jsbridge")
        .with_inner_size(LogicalSize::new(480.0, 800.0))
        .build(&event_loop)
        .map_err(|e| BridgeError::Surface(format!("window: {e}")))?;

    let surface = WrySurface::new(Rc::new(window));
    let mut shell = Shell::new(config, surface)?;
    shell.queue(steps);

    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + TURN_INTERVAL);
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::MainEventsCleared => {
                if let Err(e) = shell.turn() {
                    tracing::warn!(error = %e, "step failed");
                    shell.controller().report_error(&e);
                }
                if exit_after_steps && shell.is_idle() {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    Ok(shell.notices_shown())
}
