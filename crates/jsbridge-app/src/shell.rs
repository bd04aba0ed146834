// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The demo shell: one controller, one page, two buttons, and the turn of
// the UI loop on which every surface event is delivered.

use std::collections::VecDeque;
use std::rc::Rc;
use std::str::FromStr;

use jsbridge_bridge::{BridgeController, ScriptResult, SurfaceEvent, WebSurface};
use jsbridge_core::error::Result;
use jsbridge_core::{BridgeConfig, ScriptInvocation};

use crate::services::console_toaster::ConsoleToaster;

/// What the shell needs from a surface beyond [`WebSurface`]: its event
/// queue, its pending evaluations, and a way to act as the page's user.
pub trait PageHost {
    /// Events raised since the last call, oldest first.
    fn drain_events(&self) -> Vec<SurfaceEvent>;

    /// Deliver the answer to evaluation `request`.
    fn complete(&self, request: u64, raw: String);

    /// The user follows a link in the page.
    fn click_link(&self, url: &str) -> Result<()>;

    /// Page script calls `<object>.<method>(arg)`.
    fn call_binding(&self, object: &str, method: &str, arg: &str) -> Result<()>;
}

/// One scripted user or page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Load the start page, or the given URL, and wait for it to finish.
    Load(Option<String>),
    /// Press the "load url" button: `alertMessage(...)` in the page.
    Alert,
    /// Press the "evaluate js" button: `getResult(...)` with a result.
    Result,
    /// The user taps a link in the page.
    Link(String),
    /// Page script calls the binding's `showMessage`.
    Call(String),
    /// Evaluate an expression and print its value.
    Eval(String),
}

impl FromStr for Step {
    type Err = String;

    /// `load[:url]`, `alert`, `result`, `link:<url>`, `call:<text>`,
    /// `eval:<expr>`.
    fn from_str(arg: &str) -> std::result::Result<Self, Self::Err> {
        let (verb, rest) = match arg.split_once(':') {
            Some((verb, rest)) => (verb, Some(rest)),
            None => (arg, None),
        };
        match (verb, rest) {
            ("load", url) => Ok(Self::Load(url.map(str::to_owned))),
            ("alert", None) => Ok(Self::Alert),
            ("result", None) => Ok(Self::Result),
            ("link", Some(url)) => Ok(Self::Link(url.to_owned())),
            ("call", Some(text)) => Ok(Self::Call(text.to_owned())),
            ("eval", Some(expr)) => Ok(Self::Eval(expr.to_owned())),
            _ => Err(format!(
                "unknown step `{arg}` (expected load[:url], alert, result, link:<url>, call:<text> or eval:<expr>)"
            )),
        }
    }
}

impl Step {
    /// Press a button too early, load, then exercise every path.
    pub fn demo() -> Vec<Self> {
        vec![
            Self::Alert,
            Self::Load(None),
            Self::Link("jstag://hello".into()),
            Self::Call("hahaha".into()),
            Self::Alert,
            Self::Result,
            Self::Eval("document.title".into()),
        ]
    }
}

pub struct Shell<P> {
    controller: BridgeController,
    page: P,
    toaster: Rc<ConsoleToaster>,
    steps: VecDeque<Step>,
    awaiting_load: bool,
    evaluations: Vec<(String, ScriptResult)>,
}

impl<P> Shell<P>
where
    P: PageHost + WebSurface + Clone + 'static,
{
    pub fn new(config: BridgeConfig, page: P) -> Result<Self> {
        let toaster = Rc::new(ConsoleToaster::default());
        let mut controller =
            BridgeController::new(config, Box::new(page.clone()), toaster.clone());
        controller.install_default_bindings()?;
        tracing::info!(surface = controller.surface_name(), "shell ready");

        Ok(Self {
            controller,
            page,
            toaster,
            steps: VecDeque::new(),
            awaiting_load: false,
            evaluations: Vec::new(),
        })
    }

    pub fn controller(&self) -> &BridgeController {
        &self.controller
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn notices_shown(&self) -> usize {
        self.toaster.shown()
    }

    pub fn queue(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.steps.extend(steps);
    }

    /// No steps left, no load or evaluation outstanding.
    pub fn is_idle(&self) -> bool {
        self.steps.is_empty() && !self.awaiting_load && self.evaluations.is_empty()
    }

    /// One turn of the UI loop: deliver what the surface raised, then run
    /// the next step unless a load is still in flight.
    pub fn turn(&mut self) -> Result<()> {
        for event in self.page.drain_events() {
            self.handle(event);
        }
        self.collect_evaluations();
        if self.awaiting_load {
            return Ok(());
        }
        match self.steps.pop_front() {
            Some(step) => self.step(&step),
            None => Ok(()),
        }
    }

    pub fn step(&mut self, step: &Step) -> Result<()> {
        tracing::debug!(?step, "step");
        match step {
            Step::Load(None) => {
                self.controller.load()?;
                self.awaiting_load = true;
            }
            Step::Load(Some(url)) => {
                self.controller.load_url(url)?;
                self.awaiting_load = true;
            }
            Step::Alert => {
                self.controller.alert_message()?;
            }
            Step::Result => {
                self.controller.request_result()?;
            }
            Step::Link(url) => self.page.click_link(url)?,
            Step::Call(text) => {
                let binding = self.controller.config().binding_name.clone();
                self.page.call_binding(&binding, "showMessage", text)?;
            }
            Step::Eval(expr) => {
                let invocation = ScriptInvocation::expression(expr.as_str());
                if let Some(result) = self.controller.evaluate_script(&invocation)? {
                    self.evaluations.push((expr.clone(), result));
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PageStarted(url) => self.controller.on_page_started(&url),
            SurfaceEvent::PageFinished(url) => {
                self.controller.on_page_finished(&url);
                self.awaiting_load = false;
            }
            SurfaceEvent::Intercepted(url) => {
                self.controller.should_override_url_loading(&url);
            }
            SurfaceEvent::BindingCall { object, method, arg } => {
                if let Err(e) = self.controller.dispatch_binding(&object, &method, &arg) {
                    tracing::warn!(error = %e, "binding call rejected");
                }
            }
            SurfaceEvent::ScriptResult { request, raw } => self.page.complete(request, raw),
        }
    }

    fn collect_evaluations(&mut self) {
        self.evaluations.retain_mut(|(expr, result)| match result.try_take() {
            None => true,
            Some(Ok(value)) => {
                println!("[eval] {expr} = {}", value.raw());
                false
            }
            Some(Err(e)) => {
                tracing::warn!(expr = %expr, error = %e, "evaluation abandoned");
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsbridge_bridge::Trigger;
    use jsbridge_core::PageLoadState;

    use crate::services::scripted_page::ScriptedPage;

    fn shell() -> Shell<ScriptedPage> {
        Shell::new(BridgeConfig::default(), ScriptedPage::default()).expect("shell")
    }

    /// Run turns until the shell has nothing left to do.
    fn settle(shell: &mut Shell<ScriptedPage>) {
        for _ in 0..64 {
            shell.turn().expect("turn");
            if shell.is_idle() && shell.page().pending_events() == 0 {
                return;
            }
        }
        panic!("shell did not settle");
    }

    fn loaded() -> Shell<ScriptedPage> {
        let mut shell = shell();
        shell.queue([Step::Load(None)]);
        settle(&mut shell);
        shell
    }

    #[test]
    fn parses_steps() {
        assert_eq!("load".parse::<Step>(), Ok(Step::Load(None)));
        assert_eq!(
            "load:http://x/".parse::<Step>(),
            Ok(Step::Load(Some("http://x/".into())))
        );
        assert_eq!("link:jstag://hello".parse::<Step>(), Ok(Step::Link("jstag://hello".into())));
        assert_eq!("call:a:b".parse::<Step>(), Ok(Step::Call("a:b".into())));
        assert!("alert:x".parse::<Step>().is_err());
        assert!("bogus".parse::<Step>().is_err());
    }

    #[test]
    fn button_before_load_only_shows_notice() {
        let mut shell = shell();
        shell.step(&Step::Alert).expect("alert");
        assert_eq!(shell.notices_shown(), 1);
        assert!(shell.page().alerts().is_empty());
        assert_eq!(shell.controller().load_state(), PageLoadState::Loading);
    }

    #[test]
    fn load_finishes_page_on_later_turn() {
        let mut shell = shell();
        shell.step(&Step::Load(None)).expect("load");
        assert_eq!(shell.controller().load_state(), PageLoadState::Loading);
        assert!(!shell.is_idle());
        shell.turn().expect("turn");
        assert!(shell.controller().is_page_finished());
        assert!(shell.is_idle());
    }

    #[test]
    fn steps_wait_for_the_page_to_finish() {
        let mut shell = shell();
        shell.queue([Step::Load(None), Step::Alert]);
        shell.turn().expect("load turn");
        assert!(shell.page().alerts().is_empty());
        shell.turn().expect("alert turn");
        assert_eq!(shell.page().alerts(), vec!["hello from java".to_owned()]);
        assert_eq!(shell.notices_shown(), 0);
    }

    #[test]
    fn prefixed_link_does_not_navigate() {
        let mut shell = loaded();
        let url = shell.page().current_url();

        shell.queue([Step::Link("jstag://hello".into())]);
        settle(&mut shell);
        assert_eq!(shell.page().current_url(), url);
        assert_eq!(shell.notices_shown(), 1);
    }

    #[test]
    fn plain_link_navigates_and_reloads() {
        let mut shell = loaded();
        shell.queue([Step::Link("http://example.com/".into())]);
        settle(&mut shell);
        assert_eq!(shell.page().current_url().as_deref(), Some("http://example.com/"));
        assert!(shell.controller().is_page_finished());
        assert_eq!(shell.notices_shown(), 0);
    }

    #[test]
    fn binding_call_shows_one_notice_per_call() {
        let args = [
            "hahaha",
            "",
            r#"quote " and \ backslash"#,
            "ünïcødé ✓",
            "jstag://not-a-navigation",
        ];
        let mut shell = loaded();
        for (n, arg) in args.iter().enumerate() {
            shell.queue([Step::Call((*arg).to_owned())]);
            settle(&mut shell);
            assert_eq!(shell.notices_shown(), n + 1, "after {arg:?}");
        }
        assert_eq!(
            shell.page().current_url().as_deref(),
            Some("http://cashow.github.io/html/android_webview")
        );
    }

    #[test]
    fn buttons_after_load_reach_the_page() {
        let mut shell = loaded();
        shell.step(&Step::Alert).expect("alert");
        assert_eq!(shell.page().alerts(), vec!["hello from java".to_owned()]);

        assert_eq!(shell.controller().request_result().expect("result"), Trigger::Issued);
        assert_eq!(shell.notices_shown(), 0);
        shell.turn().expect("turn");
        assert_eq!(shell.notices_shown(), 1);
    }

    #[test]
    fn evaluation_is_collected_on_a_later_turn() {
        let mut shell = loaded();
        shell.step(&Step::Eval("document.title".into())).expect("eval");
        assert!(!shell.is_idle());
        shell.turn().expect("turn");
        assert!(shell.is_idle());
    }

    #[test]
    fn demo_runs_to_completion() {
        let mut shell = shell();
        shell.queue(Step::demo());
        settle(&mut shell);
        // early button, link message, binding call, result
        assert_eq!(shell.notices_shown(), 4);
        assert_eq!(shell.page().alerts(), vec!["hello from java".to_owned()]);
    }
}
