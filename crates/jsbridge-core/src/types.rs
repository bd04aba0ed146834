// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the WebView bridge.

use serde::{Deserialize, Serialize};

/// Load state of the page currently hosted by the web surface.
///
/// Moves to `Finished` on the navigation-completion signal and back to
/// `Loading` whenever a new navigation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation in progress (or nothing loaded yet).
    #[default]
    Loading,
    /// The surface reported that the page finished loading.
    Finished,
}

impl PageLoadState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for PageLoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// What the host should do with a navigation request it asked us about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the surface navigate as usual.
    Proceed,
    /// Swallow the navigation; it carried a bridge message.
    Cancel,
}

impl NavigationDecision {
    /// The boolean a `shouldOverrideUrlLoading`-style hook returns.
    pub fn overrides_loading(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// A message sent from page script by navigating to `<prefix><payload>`.
///
/// The payload is the raw remainder of the URL: no percent-decoding, no
/// length limit, no structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub payload: String,
}

impl BridgeMessage {
    /// Extract a message from a navigation target, if it carries the prefix.
    ///
    /// Only a leading prefix is stripped; later occurrences stay in the
    /// payload.
    pub fn from_url(prefix: &str, url: &str) -> Option<Self> {
        url.strip_prefix(prefix).map(|payload| Self {
            payload: payload.to_owned(),
        })
    }
}

/// A script call issued from native code into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptInvocation {
    /// `function("arg", ...)` with every argument passed as a string literal.
    Call { function: String, args: Vec<String> },
    /// An arbitrary expression, passed through untouched.
    Expression(String),
}

impl ScriptInvocation {
    pub fn call(function: impl Into<String>, args: &[&str]) -> Self {
        Self::Call {
            function: function.into(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    pub fn expression(script: impl Into<String>) -> Self {
        Self::Expression(script.into())
    }

    /// Render the script text handed to the engine.
    ///
    /// Arguments are encoded as JSON strings, which are valid script string
    /// literals, so quotes and backslashes in them cannot break the call.
    pub fn to_script(&self) -> String {
        match self {
            Self::Call { function, args } => {
                let rendered: Vec<String> = args
                    .iter()
                    .map(|a| serde_json::Value::String(a.clone()).to_string())
                    .collect();
                format!("{function}({})", rendered.join(", "))
            }
            Self::Expression(script) => script.clone(),
        }
    }

    /// Render as a `javascript:` URL for surfaces that only offer `loadUrl`.
    ///
    /// The URL is percent-decoded before the script runs, so a literal `%`
    /// is sent as `%25`.
    pub fn to_javascript_url(&self) -> String {
        format!("javascript:{}", self.to_script().replace('%', "%25"))
    }
}

impl std::fmt::Display for ScriptInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_script())
    }
}

/// Result of a script evaluation, exactly as the engine reported it.
///
/// Engines report the value JSON-encoded, so a string result arrives with
/// its quotes (`"hahaha"` comes back as `"\"hahaha\""`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptValue(pub String);

impl ScriptValue {
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Decode a JSON string result to its text. Non-string results
    /// (numbers, `null`, objects) are returned raw.
    pub fn as_text(&self) -> String {
        serde_json::from_str::<String>(&self.0).unwrap_or_else(|_| self.0.clone())
    }
}

impl std::fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How long a transient notice stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoticeDuration {
    #[default]
    Short,
    Long,
}

/// A short, transient, user-visible message (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub duration: NoticeDuration,
}

impl Notice {
    pub fn short(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Short,
        }
    }

    pub fn long(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NoticeDuration::Long,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "jstag://";

    #[test]
    fn message_payload_is_remainder_after_prefix() {
        let msg = BridgeMessage::from_url(PREFIX, "jstag://hello").expect("prefixed");
        assert_eq!(msg.payload, "hello");
    }

    #[test]
    fn message_payload_is_not_decoded() {
        let msg = BridgeMessage::from_url(PREFIX, "jstag://a%20b/jstag://c?x=1").expect("prefixed");
        assert_eq!(msg.payload, "a%20b/jstag://c?x=1");
    }

    #[test]
    fn empty_payload_is_still_a_message() {
        let msg = BridgeMessage::from_url(PREFIX, "jstag://").expect("prefixed");
        assert_eq!(msg.payload, "");
    }

    #[test]
    fn unprefixed_urls_are_not_messages() {
        for url in [
            "http://cashow.github.io/html/android_webview",
            "JSTAG://hello",
            " jstag://hello",
            "https://example.com/?next=jstag://hello",
            "",
        ] {
            assert!(BridgeMessage::from_url(PREFIX, url).is_none(), "{url}");
        }
    }

    #[test]
    fn call_renders_string_literal_arguments() {
        let inv = ScriptInvocation::call("alertMessage", &["hello from java"]);
        assert_eq!(inv.to_script(), r#"alertMessage("hello from java")"#);
        assert_eq!(
            inv.to_javascript_url(),
            r#"javascript:alertMessage("hello from java")"#
        );
    }

    #[test]
    fn javascript_url_keeps_percent_signs_literal() {
        let expr = ScriptInvocation::expression("x % 2 === 0");
        assert_eq!(expr.to_script(), "x % 2 === 0");
        assert_eq!(expr.to_javascript_url(), "javascript:x %25 2 === 0");

        let call = ScriptInvocation::call("alertMessage", &["100%25 done"]);
        assert_eq!(call.to_script(), r#"alertMessage("100%25 done")"#);
        assert_eq!(
            call.to_javascript_url(),
            r#"javascript:alertMessage("100%2525 done")"#
        );
    }

    #[test]
    fn call_escapes_quotes_and_backslashes() {
        let inv = ScriptInvocation::call("f", &[r#"say "hi" \ bye"#, ""]);
        assert_eq!(inv.to_script(), r#"f("say \"hi\" \\ bye", "")"#);
    }

    #[test]
    fn expression_is_passed_through() {
        let inv = ScriptInvocation::expression("document.title");
        assert_eq!(inv.to_script(), "document.title");
    }

    #[test]
    fn script_value_decodes_json_strings_only() {
        assert_eq!(ScriptValue("\"hahaha\"".into()).as_text(), "hahaha");
        assert_eq!(ScriptValue("42".into()).as_text(), "42");
        assert_eq!(ScriptValue("null".into()).as_text(), "null");
        assert_eq!(ScriptValue("\"hahaha\"".into()).raw(), "\"hahaha\"");
    }

    #[test]
    fn navigation_decision_maps_to_override_flag() {
        assert!(NavigationDecision::Cancel.overrides_loading());
        assert!(!NavigationDecision::Proceed.overrides_loading());
    }

    #[test]
    fn load_state_defaults_to_loading() {
        assert_eq!(PageLoadState::default(), PageLoadState::Loading);
        assert!(!PageLoadState::Loading.is_finished());
        assert!(PageLoadState::Finished.is_finished());
    }
}
