// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop web surface over wry, hosted in a tao window.
//
// The wry `WebView` is built on the first `load_url`, once the binding set
// is known, because initialization scripts and handlers can only be given
// to the builder. Engine callbacks push `SurfaceEvent`s onto an
// `EventQueue`; the host drains it on the UI thread and feeds the
// controller.
//
// Navigation to the message prefix is cancelled inside the navigation
// handler itself, since that is the only place wry lets us say no.

#![cfg(all(feature = "webview", not(target_os = "android")))]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tao::window::Window;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{BridgeConfig, BridgeMessage, ScriptValue};

use crate::events::{EventQueue, SurfaceEvent};
use crate::ipc::{self, BindingCall};
use crate::traits::{ResultCallback, WebSurface};

fn wry_err(context: &str, e: wry::Error) -> BridgeError {
    BridgeError::Surface(format!("{context}: {e}"))
}

#[derive(Default)]
struct WryState {
    config: BridgeConfig,
    binding: Option<(String, Vec<String>)>,
    webview: Option<WebView>,
    pending: HashMap<u64, ResultCallback>,
    next_request: u64,
}

/// [`WebSurface`] backed by a wry `WebView` filling a tao window.
///
/// Clones share the same view; the host keeps one to drain events and
/// complete evaluations while the controller owns another.
#[derive(Clone)]
pub struct WrySurface {
    window: Rc<Window>,
    events: EventQueue,
    state: Rc<RefCell<WryState>>,
}

impl WrySurface {
    pub fn new(window: Rc<Window>) -> Self {
        Self {
            window,
            events: EventQueue::default(),
            state: Rc::new(RefCell::new(WryState::default())),
        }
    }

    /// Events raised since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<SurfaceEvent> {
        self.events.drain()
    }

    /// Hand an evaluation result to the continuation registered for it.
    pub fn complete(&self, request: u64, raw: String) {
        let callback = self.state.borrow_mut().pending.remove(&request);
        match callback {
            Some(callback) => callback(ScriptValue(raw)),
            None => tracing::warn!(request, "result for unknown evaluation dropped"),
        }
    }

    /// Run script in the page as the page itself would, bypassing the
    /// controller's readiness gate.
    pub fn run_in_page(&self, script: &str) -> Result<()> {
        let state = self.state.borrow();
        let webview = state
            .webview
            .as_ref()
            .ok_or_else(|| BridgeError::Surface("no page loaded".into()))?;
        webview
            .evaluate_script(script)
            .map_err(|e| wry_err("evaluate_script", e))
    }

    fn build(&self, state: &WryState, url: &str) -> Result<WebView> {
        let mut builder = WebViewBuilder::new()
            .with_url(url)
            .with_devtools(cfg!(debug_assertions));

        if let Some((name, methods)) = &state.binding {
            builder = builder.with_initialization_script(&ipc::binding_script(name, methods));
        }

        let ipc_events = self.events.clone();
        builder = builder.with_ipc_handler(move |request: wry::http::Request<String>| {
            match BindingCall::from_json(request.body()) {
                Some(call) => ipc_events.push(call.into()),
                None => tracing::debug!(body = %request.body(), "ignoring non-binding ipc message"),
            }
        });

        let prefix = state.config.message_prefix.clone();
        let nav_events = self.events.clone();
        builder = builder.with_navigation_handler(move |url: String| {
            if BridgeMessage::from_url(&prefix, &url).is_some() {
                nav_events.push(SurfaceEvent::Intercepted(url));
                return false;
            }
            true
        });

        let load_events = self.events.clone();
        builder = builder.with_on_page_load_handler(move |event, url| {
            load_events.push(match event {
                PageLoadEvent::Started => SurfaceEvent::PageStarted(url),
                PageLoadEvent::Finished => SurfaceEvent::PageFinished(url),
            });
        });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            builder
                .build_gtk(self.window.gtk_window())
                .map_err(|e| wry_err("build_gtk", e))?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .build(&*self.window)
            .map_err(|e| wry_err("build", e))?;

        Ok(webview)
    }
}

impl WebSurface for WrySurface {
    fn surface_name(&self) -> &str {
        "Desktop WebView (wry)"
    }

    fn configure(&self, config: &BridgeConfig) -> Result<()> {
        if !config.javascript_enabled {
            tracing::warn!("wry cannot disable JavaScript; setting ignored");
        }
        self.state.borrow_mut().config = config.clone();
        Ok(())
    }

    fn expose_binding(&self, name: &str, methods: &[String]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.webview.is_some() {
            return Err(BridgeError::BindingsSealed);
        }
        state.binding = Some((name.to_owned(), methods.to_vec()));
        tracing::info!(name, ?methods, "wry: binding script installed");
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(webview) = &state.webview {
            return webview.load_url(url).map_err(|e| wry_err("load_url", e));
        }
        let webview = self.build(&state, url)?;
        state.webview = Some(webview);
        Ok(())
    }

    fn load_javascript_url(&self, url: &str) -> Result<()> {
        let script = ipc::script_from_javascript_url(url)
            .ok_or_else(|| BridgeError::Surface(format!("not a javascript: url: {url}")))?;
        self.run_in_page(&script)
    }

    fn evaluate(&self, script: &str, on_result: Option<ResultCallback>) -> Result<()> {
        let Some(callback) = on_result else {
            return self.run_in_page(script);
        };

        let mut state = self.state.borrow_mut();
        let request = state.next_request;
        let events = self.events.clone();
        let sent = match &state.webview {
            Some(webview) => webview
                .evaluate_script_with_callback(script, move |raw| {
                    events.push(SurfaceEvent::ScriptResult { request, raw });
                })
                .map_err(|e| wry_err("evaluate_script_with_callback", e)),
            None => Err(BridgeError::Surface("no page loaded".into())),
        };
        sent?;
        state.next_request += 1;
        state.pending.insert(request, callback);
        Ok(())
    }
}
