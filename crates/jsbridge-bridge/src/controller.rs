// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge controller: one page, one load state, two ways in and two
// ways out.
//
// Page → native
//   * navigation intercept: `<prefix><payload>` targets are cancelled and
//     the payload handed to the message handler.
//   * exposed binding: methods in the `BindingTable`, reachable from script
//     as `<binding_name>.<method>(arg)`.
//
// Native → page
//   * `execute_script`: fire-and-forget.
//   * `evaluate_script` / `evaluate_script_with`: single-shot result.
//
// Both outbound paths check the load state first. Before the page has
// finished loading the call is dropped and the "page loading" notice is
// shown instead; nothing is queued or retried.

use std::rc::Rc;

use tracing::{debug, info};

use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{
    BridgeConfig, BridgeMessage, NavigationDecision, PageLoadState, ScriptInvocation,
    ScriptValue, notices,
};

use crate::bindings::{BindingHandler, BindingTable};
use crate::completion::{self, ScriptResult};
use crate::traits::{NoticeSink, WebSurface};

/// Called with every message the page sends through the navigation intercept.
pub type MessageHandler = Box<dyn Fn(&BridgeMessage) + 'static>;

/// Whether an outbound trigger reached the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The script was handed to the surface.
    Issued,
    /// The page was still loading; a notice was shown instead.
    Suppressed,
}

/// Mediates calls between native code and the page hosted by a surface.
pub struct BridgeController {
    config: BridgeConfig,
    surface: Box<dyn WebSurface>,
    notices: Rc<dyn NoticeSink>,
    load_state: PageLoadState,
    bindings: BindingTable,
    on_message: Option<MessageHandler>,
}

impl BridgeController {
    pub fn new(
        config: BridgeConfig,
        surface: Box<dyn WebSurface>,
        notices: Rc<dyn NoticeSink>,
    ) -> Self {
        Self {
            config,
            surface,
            notices,
            load_state: PageLoadState::Loading,
            bindings: BindingTable::new(),
            on_message: None,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn surface_name(&self) -> &str {
        self.surface.surface_name()
    }

    pub fn load_state(&self) -> PageLoadState {
        self.load_state
    }

    pub fn is_page_finished(&self) -> bool {
        self.load_state.is_finished()
    }

    // -- Setup ---------------------------------------------------------------

    /// Register a script-callable method on the exposed binding object.
    ///
    /// Fails with [`BridgeError::BindingsSealed`] once content has started
    /// loading.
    pub fn register_binding(
        &mut self,
        method: &str,
        handler: impl Fn(&str) + 'static,
    ) -> Result<()> {
        let handler: BindingHandler = Box::new(handler);
        self.bindings.register(method, handler)?;
        debug!(binding = %self.config.binding_name, method, "binding registered");
        Ok(())
    }

    /// Register `showMessage`, which shows whatever string the page passes.
    pub fn install_default_bindings(&mut self) -> Result<()> {
        let sink = Rc::clone(&self.notices);
        let config = self.config.clone();
        self.register_binding("showMessage", move |text| {
            sink.show_notice(&notices::received(&config, text));
        })
    }

    /// Replace the handler for intercepted navigation messages.
    ///
    /// Without one, each message is shown as a notice.
    pub fn set_message_handler(&mut self, handler: impl Fn(&BridgeMessage) + 'static) {
        self.on_message = Some(Box::new(handler));
    }

    /// Load the configured start page.
    pub fn load(&mut self) -> Result<()> {
        let url = self.config.start_url.clone();
        self.load_url(&url)
    }

    /// Navigate the surface to `url`.
    ///
    /// The first call configures the surface and exposes the binding object.
    /// The binding table is sealed only once the surface accepted it, so a
    /// failed expose is retried by the next load.
    pub fn load_url(&mut self, url: &str) -> Result<()> {
        if !self.bindings.is_sealed() {
            self.surface.configure(&self.config)?;
            let methods = self.bindings.methods();
            self.surface
                .expose_binding(&self.config.binding_name, &methods)?;
            self.bindings.seal();
            info!(
                surface = self.surface.surface_name(),
                binding = %self.config.binding_name,
                methods = ?methods,
                "binding exposed"
            );
        }
        self.load_state = PageLoadState::Loading;
        info!(url, "loading page");
        self.surface.load_url(url)
    }

    // -- Surface callbacks ---------------------------------------------------

    /// Navigation hook. Prefixed targets become messages and are cancelled.
    pub fn should_override_url_loading(&self, url: &str) -> NavigationDecision {
        match BridgeMessage::from_url(&self.config.message_prefix, url) {
            Some(message) => {
                debug!(payload = %message.payload, "navigation intercepted");
                self.handle_message(&message);
                NavigationDecision::Cancel
            }
            None => NavigationDecision::Proceed,
        }
    }

    /// A new navigation started; outbound scripts wait for it to finish.
    pub fn on_page_started(&mut self, url: &str) {
        if self.load_state != PageLoadState::Loading {
            debug!(url, "page load restarted");
        }
        self.load_state = PageLoadState::Loading;
    }

    pub fn on_page_finished(&mut self, url: &str) {
        self.load_state = PageLoadState::Finished;
        info!(url, "page finished loading");
    }

    /// Entry point for `<object>.<method>(arg)` calls made by page script.
    ///
    /// Runs the handler synchronously; nothing is returned to the page.
    pub fn dispatch_binding(&self, object: &str, method: &str, arg: &str) -> Result<()> {
        if object == self.config.binding_name && self.bindings.invoke(method, arg) {
            debug!(object, method, "binding call handled");
            return Ok(());
        }
        Err(BridgeError::UnknownBinding {
            object: object.to_owned(),
            method: method.to_owned(),
        })
    }

    // -- Outbound ------------------------------------------------------------

    /// Run a script in the page without waiting for a result.
    pub fn execute_script(&self, invocation: &ScriptInvocation) -> Result<Trigger> {
        if self.suppress_before_ready(invocation) {
            return Ok(Trigger::Suppressed);
        }
        if self.config.legacy_execute {
            self.surface
                .load_javascript_url(&invocation.to_javascript_url())?;
        } else {
            self.surface.evaluate(&invocation.to_script(), None)?;
        }
        debug!(script = %invocation, "script issued");
        Ok(Trigger::Issued)
    }

    /// Evaluate a script and hand its result to `on_result` exactly once.
    pub fn evaluate_script_with(
        &self,
        invocation: &ScriptInvocation,
        on_result: impl FnOnce(ScriptValue) + 'static,
    ) -> Result<Trigger> {
        if self.suppress_before_ready(invocation) {
            return Ok(Trigger::Suppressed);
        }
        self.surface
            .evaluate(&invocation.to_script(), Some(Box::new(on_result)))?;
        debug!(script = %invocation, "script evaluation requested");
        Ok(Trigger::Issued)
    }

    /// Evaluate a script and return a handle resolving to its result, or
    /// `None` if the page was not ready and a notice was shown instead.
    pub fn evaluate_script(&self, invocation: &ScriptInvocation) -> Result<Option<ScriptResult>> {
        if self.suppress_before_ready(invocation) {
            return Ok(None);
        }
        let (callback, result) = completion::channel();
        self.surface.evaluate(&invocation.to_script(), Some(callback))?;
        debug!(script = %invocation, "script evaluation requested");
        Ok(Some(result))
    }

    // -- Shell buttons -------------------------------------------------------

    /// Ask the page to show an alert with the configured text.
    pub fn alert_message(&self) -> Result<Trigger> {
        let invocation =
            ScriptInvocation::call("alertMessage", &[self.config.alert_argument.as_str()]);
        self.execute_script(&invocation)
    }

    /// Ask the page for a string and show it once it arrives.
    pub fn request_result(&self) -> Result<Trigger> {
        let invocation =
            ScriptInvocation::call("getResult", &[self.config.result_argument.as_str()]);
        let sink = Rc::clone(&self.notices);
        let config = self.config.clone();
        self.evaluate_script_with(&invocation, move |value| {
            debug!(value = %value, "script result received");
            sink.show_notice(&notices::received(&config, &value.as_text()));
        })
    }

    /// Show the notice for an error the host glue could not otherwise report.
    pub fn report_error(&self, err: &BridgeError) {
        self.notices
            .show_notice(&notices::humanize_error(&self.config, err));
    }

    // -- Internals -----------------------------------------------------------

    fn handle_message(&self, message: &BridgeMessage) {
        match &self.on_message {
            Some(handler) => handler(message),
            None => self
                .notices
                .show_notice(&notices::received(&self.config, &message.payload)),
        }
    }

    fn suppress_before_ready(&self, invocation: &ScriptInvocation) -> bool {
        if self.load_state.is_finished() {
            return false;
        }
        info!(script = %invocation, "page still loading, script suppressed");
        self.report_error(&BridgeError::PageNotReady);
        true
    }
}

impl std::fmt::Debug for BridgeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeController")
            .field("surface", &self.surface.surface_name())
            .field("load_state", &self.load_state)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
