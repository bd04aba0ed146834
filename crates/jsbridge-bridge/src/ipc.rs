// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Page-side wiring for surfaces without a native object bridge.
//!
//! Engines such as wry only offer `window.ipc.postMessage(string)`. The
//! binding object is therefore defined by an initialization script whose
//! methods post a JSON call record; the host parses it back into a
//! [`SurfaceEvent::BindingCall`].

use serde::{Deserialize, Serialize};

use crate::events::SurfaceEvent;

/// One binding call as posted by the initialization script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingCall {
    pub object: String,
    pub method: String,
    pub arg: String,
}

impl BindingCall {
    /// Parse a posted message. Anything else on the channel yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl From<BindingCall> for SurfaceEvent {
    fn from(call: BindingCall) -> Self {
        SurfaceEvent::BindingCall {
            object: call.object,
            method: call.method,
            arg: call.arg,
        }
    }
}

/// Script that defines `window.<name>.<method>(arg)` for each method.
///
/// The argument is converted with `String(arg)`, the same coercion a
/// string-typed native parameter applies.
pub fn binding_script(name: &str, methods: &[String]) -> String {
    let name = serde_json::Value::String(name.to_owned());
    let methods = serde_json::Value::Array(
        methods
            .iter()
            .cloned()
            .map(serde_json::Value::String)
            .collect(),
    );
    format!(
        r#"(function () {{
  var name = {name};
  var target = window[name] = window[name] || {{}};
  {methods}.forEach(function (method) {{
    target[method] = function (arg) {{
      window.ipc.postMessage(JSON.stringify({{ object: name, method: method, arg: String(arg) }}));
    }};
  }});
}})();"#
    )
}

/// The script inside a `javascript:` URL, undoing the `%25` escaping
/// applied when the URL was built.
pub fn script_from_javascript_url(url: &str) -> Option<String> {
    url.strip_prefix("javascript:")
        .map(|script| script.replace("%25", "%"))
}
