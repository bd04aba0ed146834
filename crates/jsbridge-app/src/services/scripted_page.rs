// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless stand-in for the demo page, used by the shell tests.
//
// It understands the calls the demo page defines, `alertMessage(s)` and
// `getResult(s)`, plus `document.title`. Everything a real engine reports
// asynchronously (load progress, evaluation results, intercepted
// navigation and binding calls) is queued as a `SurfaceEvent`, so it
// reaches the controller on a later turn, as with `WrySurface`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use jsbridge_bridge::{EventQueue, ResultCallback, SurfaceEvent, WebSurface};
use jsbridge_core::error::Result;
use jsbridge_core::{BridgeConfig, BridgeMessage, ScriptValue};

use crate::shell::PageHost;

const PAGE_TITLE: &str = "android_webview";

#[derive(Default)]
struct PageModel {
    url: Option<String>,
    config: BridgeConfig,
    /// Exposed binding objects and their methods.
    bindings: Vec<(String, Vec<String>)>,
    /// Alerts the page has shown.
    alerts: Vec<String>,
    pending: HashMap<u64, ResultCallback>,
    next_request: u64,
    queued: usize,
}

/// The demo page, rendered nowhere.
#[derive(Clone, Default)]
pub struct ScriptedPage {
    events: EventQueue,
    model: Rc<RefCell<PageModel>>,
}

impl ScriptedPage {
    pub fn alerts(&self) -> Vec<String> {
        self.model.borrow().alerts.clone()
    }

    pub fn current_url(&self) -> Option<String> {
        self.model.borrow().url.clone()
    }

    /// Events queued and not yet drained.
    pub fn pending_events(&self) -> usize {
        self.model.borrow().queued
    }

    fn post(&self, event: SurfaceEvent) {
        self.model.borrow_mut().queued += 1;
        self.events.push(event);
    }

    /// Run `script` against the page and return its JSON-encoded value.
    fn run(&self, script: &str) -> String {
        if !self.model.borrow().config.javascript_enabled {
            return "null".into();
        }
        if script.trim() == "document.title" {
            return json_string(PAGE_TITLE);
        }
        match parse_call(script) {
            Some((name, args)) if name == "alertMessage" => {
                let text = args.into_iter().next().unwrap_or_default();
                self.model.borrow_mut().alerts.push(text);
                "null".into()
            }
            Some((name, args)) if name == "getResult" => {
                let arg = args.into_iter().next().unwrap_or_default();
                json_string(&arg)
            }
            _ => "null".into(),
        }
    }
}

impl PageHost for ScriptedPage {
    fn drain_events(&self) -> Vec<SurfaceEvent> {
        self.model.borrow_mut().queued = 0;
        self.events.drain()
    }

    fn complete(&self, request: u64, raw: String) {
        let callback = self.model.borrow_mut().pending.remove(&request);
        if let Some(callback) = callback {
            callback(ScriptValue(raw));
        }
    }

    fn click_link(&self, url: &str) -> Result<()> {
        let prefix = self.model.borrow().config.message_prefix.clone();
        if BridgeMessage::from_url(&prefix, url).is_some() {
            self.post(SurfaceEvent::Intercepted(url.to_owned()));
            return Ok(());
        }
        self.load_url(url)
    }

    fn call_binding(&self, object: &str, method: &str, arg: &str) -> Result<()> {
        let exposed = self
            .model
            .borrow()
            .bindings
            .iter()
            .any(|(name, methods)| name == object && methods.iter().any(|m| m == method));
        // Otherwise a TypeError inside the page.
        if exposed {
            self.post(SurfaceEvent::BindingCall {
                object: object.to_owned(),
                method: method.to_owned(),
                arg: arg.to_owned(),
            });
        }
        Ok(())
    }
}

impl WebSurface for ScriptedPage {
    fn surface_name(&self) -> &str {
        "Scripted page"
    }

    fn configure(&self, config: &BridgeConfig) -> Result<()> {
        self.model.borrow_mut().config = config.clone();
        Ok(())
    }

    fn expose_binding(&self, name: &str, methods: &[String]) -> Result<()> {
        self.model
            .borrow_mut()
            .bindings
            .push((name.to_owned(), methods.to_vec()));
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<()> {
        self.model.borrow_mut().url = Some(url.to_owned());
        self.post(SurfaceEvent::PageStarted(url.to_owned()));
        self.post(SurfaceEvent::PageFinished(url.to_owned()));
        Ok(())
    }

    fn load_javascript_url(&self, url: &str) -> Result<()> {
        let script = jsbridge_bridge::ipc::script_from_javascript_url(url).unwrap_or_default();
        self.run(&script);
        Ok(())
    }

    fn evaluate(&self, script: &str, on_result: Option<ResultCallback>) -> Result<()> {
        let raw = self.run(script);
        if let Some(callback) = on_result {
            let request = {
                let mut model = self.model.borrow_mut();
                let request = model.next_request;
                model.next_request += 1;
                model.pending.insert(request, callback);
                request
            };
            self.post(SurfaceEvent::ScriptResult { request, raw });
        }
        Ok(())
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// Split `name("a", "b")` into its name and string arguments.
fn parse_call(script: &str) -> Option<(String, Vec<String>)> {
    let script = script.trim().trim_end_matches(';');
    let open = script.find('(')?;
    let inner = script.get(open + 1..)?.strip_suffix(')')?;
    let name = script[..open].trim();
    if name.is_empty() {
        return None;
    }
    let args: Vec<String> = serde_json::from_str(&format!("[{inner}]")).ok()?;
    Some((name.to_owned(), args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ScriptedPage {
        let page = ScriptedPage::default();
        page.configure(&BridgeConfig::default()).expect("configure");
        page
    }

    #[test]
    fn parses_string_calls() {
        assert_eq!(
            parse_call(r#"getResult("hahaha")"#),
            Some(("getResult".into(), vec!["hahaha".into()]))
        );
        assert_eq!(
            parse_call(r#"f("a \"b\"", "c");"#),
            Some(("f".into(), vec!["a \"b\"".into(), "c".into()]))
        );
        assert_eq!(parse_call("f()"), Some(("f".into(), vec![])));
        assert_eq!(parse_call("document.title"), None);
        assert_eq!(parse_call("f(1)"), None);
    }

    #[test]
    fn javascript_url_runs_alert() {
        let page = page();
        page.load_javascript_url(r#"javascript:alertMessage("50%25 from java")"#)
            .expect("run");
        assert_eq!(page.alerts(), vec!["50% from java".to_owned()]);
    }

    #[test]
    fn evaluation_result_is_queued_not_returned() {
        let page = page();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        page.evaluate(
            r#"getResult("hahaha")"#,
            Some(Box::new(move |v: ScriptValue| *sink.borrow_mut() = Some(v))),
        )
        .expect("evaluate");
        assert!(seen.borrow().is_none());

        match page.drain_events().as_slice() {
            [SurfaceEvent::ScriptResult { request, raw }] => page.complete(*request, raw.clone()),
            other => panic!("unexpected events {other:?}"),
        }
        assert_eq!(*seen.borrow(), Some(ScriptValue("\"hahaha\"".into())));
    }

    #[test]
    fn load_queues_start_then_finish() {
        let page = page();
        page.load_url("http://example.com/").expect("load");
        assert_eq!(page.pending_events(), 2);
        assert_eq!(
            page.drain_events(),
            vec![
                SurfaceEvent::PageStarted("http://example.com/".into()),
                SurfaceEvent::PageFinished("http://example.com/".into()),
            ]
        );
        assert_eq!(page.pending_events(), 0);
        assert_eq!(page.current_url().as_deref(), Some("http://example.com/"));
    }

    #[test]
    fn prefixed_link_is_intercepted_without_loading() {
        let page = page();
        page.click_link("jstag://hello").expect("click");
        assert_eq!(
            page.drain_events(),
            vec![SurfaceEvent::Intercepted("jstag://hello".into())]
        );
        assert!(page.current_url().is_none());
    }

    #[test]
    fn unexposed_binding_call_is_dropped() {
        let page = page();
        page.call_binding("androidtag", "showMessage", "x").expect("call");
        assert!(page.drain_events().is_empty());

        page.expose_binding("androidtag", &["showMessage".into()])
            .expect("expose");
        page.call_binding("androidtag", "showMessage", "x").expect("call");
        assert!(matches!(
            page.drain_events().as_slice(),
            [SurfaceEvent::BindingCall { .. }]
        ));
    }
}
