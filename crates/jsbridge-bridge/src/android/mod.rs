// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android web surface via JNI.
//
// Drives an `android.webkit.WebView` owned by the host Activity. The Java
// side is a small glue class, `com.hyperpolymath.jsbridge.BridgeHost`, which
//
//   * forwards `WebViewClient.shouldOverrideUrlLoading`, `onPageStarted` and
//     `onPageFinished` to the `native*` entry points below;
//   * registers a `@JavascriptInterface` object per exposed binding whose
//     methods call `nativeOnBindingCall` (posted to the UI thread first;
//     WebView runs interface methods on a background thread);
//   * wraps `evaluateJavascript` in a `ValueCallback` that reports back via
//     `nativeOnEvaluateResult(requestId, value)`;
//   * shows toasts.
//
// ## Architecture notes
//
// Everything runs on the UI thread. The controller and the pending
// evaluation callbacks live in thread-locals of that thread; entry points
// called from any other thread find nothing and log a warning.
//
// `addJavascriptInterface` exposes every public method of the object to
// any page on API < 17. The glue only annotates the registered methods,
// which is all the protection offered here.

#![cfg(target_os = "android")]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::OnceLock;

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jlong, jsize};
use jni::{JNIEnv, JavaVM};

use jsbridge_core::error::{BridgeError, Result};
use jsbridge_core::{BridgeConfig, Notice, NoticeDuration, ScriptValue};

use crate::controller::BridgeController;
use crate::traits::{NoticeSink, ResultCallback, WebSurface};

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Request id passed to the glue when no result is wanted.
const NO_RESULT: jlong = -1;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

thread_local! {
    static CONTROLLER: RefCell<Option<BridgeController>> = const { RefCell::new(None) };
    static ATTACHED: RefCell<Option<AndroidSurface>> = const { RefCell::new(None) };
    static PENDING: RefCell<HashMap<jlong, ResultCallback>> = RefCell::new(HashMap::new());
    static NEXT_REQUEST: Cell<jlong> = const { Cell::new(0) };
}

/// The `JavaVM`, recorded at `nativeCreate` or taken from the NDK context.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::Surface(format!("failed to obtain JavaVM: {e}")))?;
    let _ = JAVA_VM.set(vm);
    JAVA_VM
        .get()
        .ok_or_else(|| BridgeError::Surface("JavaVM not recorded".into()))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| jni_err("attach_current_thread", e))
}

/// Convenience: map any `jni::errors::Error` into `BridgeError::Surface`.
fn jni_err(context: &str, e: jni::errors::Error) -> BridgeError {
    BridgeError::Surface(format!("{context}: {e}"))
}

fn read_string(env: &mut JNIEnv<'_>, s: &JString<'_>) -> Option<String> {
    if s.is_null() {
        return None;
    }
    env.get_string(s).ok().map(String::from)
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Android implementation of [`WebSurface`] over a host-owned `WebView`.
#[derive(Clone)]
pub struct AndroidSurface {
    webview: GlobalRef,
    host_class: GlobalRef,
}

impl AndroidSurface {
    /// The surface for the `WebView` the host passed to `nativeCreate`.
    pub fn attached() -> Result<Self> {
        ATTACHED
            .with(|a| a.borrow().clone())
            .ok_or_else(|| BridgeError::Surface("no WebView attached on this thread".into()))
    }

    fn call_host(&self, env: &mut JNIEnv<'_>, name: &str, sig: &str, args: &[JValue]) -> Result<()> {
        let class = <&JClass>::from(self.host_class.as_obj());
        env.call_static_method(class, name, sig, args)
            .map_err(|e| jni_err(name, e))?;
        Ok(())
    }
}

impl WebSurface for AndroidSurface {
    fn surface_name(&self) -> &str {
        "Android WebView"
    }

    fn configure(&self, config: &BridgeConfig) -> Result<()> {
        let mut env = jni_env()?;

        let settings: JObject = env
            .call_method(
                self.webview.as_obj(),
                "getSettings",
                "()Landroid/webkit/WebSettings;",
                &[],
            )
            .map_err(|e| jni_err("getSettings", e))?
            .l()
            .map_err(|e| jni_err("getSettings->l", e))?;

        env.call_method(
            &settings,
            "setJavaScriptEnabled",
            "(Z)V",
            &[JValue::Bool(config.javascript_enabled as jboolean)],
        )
        .map_err(|e| jni_err("setJavaScriptEnabled", e))?;

        env.call_method(
            &settings,
            "setDisplayZoomControls",
            "(Z)V",
            &[JValue::Bool(config.display_zoom_controls as jboolean)],
        )
        .map_err(|e| jni_err("setDisplayZoomControls", e))?;

        Ok(())
    }

    fn expose_binding(&self, name: &str, methods: &[String]) -> Result<()> {
        let mut env = jni_env()?;

        let j_name: JString = env
            .new_string(name)
            .map_err(|e| jni_err("new_string(name)", e))?;
        let j_methods = env
            .new_object_array(methods.len() as jsize, "java/lang/String", JObject::null())
            .map_err(|e| jni_err("new_object_array", e))?;
        for (i, method) in methods.iter().enumerate() {
            let j_method = env
                .new_string(method)
                .map_err(|e| jni_err("new_string(method)", e))?;
            env.set_object_array_element(&j_methods, i as jsize, &j_method)
                .map_err(|e| jni_err("set_object_array_element", e))?;
        }

        self.call_host(
            &mut env,
            "exposeBinding",
            "(Landroid/webkit/WebView;Ljava/lang/String;[Ljava/lang/String;)V",
            &[
                JValue::Object(self.webview.as_obj()),
                JValue::Object(&j_name),
                JValue::Object(&j_methods),
            ],
        )?;

        tracing::info!(name, ?methods, "Android: javascript interface added");
        Ok(())
    }

    fn load_url(&self, url: &str) -> Result<()> {
        let mut env = jni_env()?;
        let j_url: JString = env
            .new_string(url)
            .map_err(|e| jni_err("new_string(url)", e))?;
        env.call_method(
            self.webview.as_obj(),
            "loadUrl",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_url)],
        )
        .map_err(|e| jni_err("loadUrl", e))?;
        Ok(())
    }

    fn load_javascript_url(&self, url: &str) -> Result<()> {
        self.load_url(url)
    }

    fn evaluate(&self, script: &str, on_result: Option<ResultCallback>) -> Result<()> {
        let mut env = jni_env()?;

        let j_script: JString = env
            .new_string(script)
            .map_err(|e| jni_err("new_string(script)", e))?;

        // Registered last so every early return above leaves PENDING untouched.
        let request_id = match on_result {
            Some(callback) => {
                let id = NEXT_REQUEST.with(|n| {
                    let id = n.get();
                    n.set(id + 1);
                    id
                });
                PENDING.with(|p| p.borrow_mut().insert(id, callback));
                id
            }
            None => NO_RESULT,
        };

        let sent = self.call_host(
            &mut env,
            "evaluate",
            "(Landroid/webkit/WebView;Ljava/lang/String;J)V",
            &[
                JValue::Object(self.webview.as_obj()),
                JValue::Object(&j_script),
                JValue::Long(request_id),
            ],
        );
        if sent.is_err() && request_id != NO_RESULT {
            PENDING.with(|p| p.borrow_mut().remove(&request_id));
        }
        sent
    }
}

// ---------------------------------------------------------------------------
// Toasts
// ---------------------------------------------------------------------------

/// Shows notices as `android.widget.Toast` through the glue class.
pub struct AndroidToaster {
    activity: GlobalRef,
    host_class: GlobalRef,
}

impl AndroidToaster {
    fn show(&self, notice: &Notice) -> Result<()> {
        let mut env = jni_env()?;
        let j_text: JString = env
            .new_string(&notice.text)
            .map_err(|e| jni_err("new_string(text)", e))?;
        let long = matches!(notice.duration, NoticeDuration::Long);
        let class = <&JClass>::from(self.host_class.as_obj());
        env.call_static_method(
            class,
            "showToast",
            "(Landroid/app/Activity;Ljava/lang/String;Z)V",
            &[
                JValue::Object(self.activity.as_obj()),
                JValue::Object(&j_text),
                JValue::Bool(long as jboolean),
            ],
        )
        .map_err(|e| jni_err("showToast", e))?;
        Ok(())
    }
}

impl NoticeSink for AndroidToaster {
    fn show_notice(&self, notice: &Notice) {
        if let Err(e) = self.show(notice) {
            tracing::warn!(error = %e, text = %notice.text, "Android: toast failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points called by BridgeHost
// ---------------------------------------------------------------------------

fn with_controller<R>(f: impl FnOnce(&mut BridgeController) -> R) -> Option<R> {
    CONTROLLER.with(|c| match c.try_borrow_mut() {
        Ok(mut slot) => match slot.as_mut() {
            Some(controller) => Some(f(controller)),
            None => {
                tracing::warn!("Android: bridge call before nativeCreate succeeded, ignored");
                None
            }
        },
        Err(_) => {
            tracing::warn!("Android: re-entrant bridge call ignored");
            None
        }
    })
}

fn create(
    env: &mut JNIEnv<'_>,
    class: &JClass<'_>,
    activity: &JObject<'_>,
    webview: &JObject<'_>,
    config_json: &JString<'_>,
) -> Result<()> {
    let vm = env.get_java_vm().map_err(|e| jni_err("get_java_vm", e))?;
    let _ = JAVA_VM.set(vm);

    let config = match read_string(env, config_json) {
        Some(json) => BridgeConfig::from_json(&json)?,
        None => BridgeConfig::default(),
    };

    let host_class = env
        .new_global_ref(class)
        .map_err(|e| jni_err("new_global_ref(class)", e))?;
    let surface = AndroidSurface {
        webview: env
            .new_global_ref(webview)
            .map_err(|e| jni_err("new_global_ref(webview)", e))?,
        host_class: host_class.clone(),
    };
    let toaster = AndroidToaster {
        activity: env
            .new_global_ref(activity)
            .map_err(|e| jni_err("new_global_ref(activity)", e))?,
        host_class,
    };

    ATTACHED.with(|a| *a.borrow_mut() = Some(surface));
    match start_controller(config, toaster) {
        Ok(controller) => {
            CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
            Ok(())
        }
        Err(e) => {
            ATTACHED.with(|a| a.borrow_mut().take());
            Err(e)
        }
    }
}

fn start_controller(config: BridgeConfig, toaster: AndroidToaster) -> Result<BridgeController> {
    let mut controller =
        BridgeController::new(config, crate::platform_surface()?, Rc::new(toaster));
    controller.install_default_bindings()?;
    controller.load()?;
    Ok(controller)
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeCreate<'local>(
    mut env: JNIEnv<'local>,
    class: JClass<'local>,
    activity: JObject<'local>,
    webview: JObject<'local>,
    config_json: JString<'local>,
) {
    if let Err(e) = create(&mut env, &class, &activity, &webview, &config_json) {
        tracing::error!(error = %e, "Android: bridge creation failed");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeDestroy<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    CONTROLLER.with(|c| c.borrow_mut().take());
    ATTACHED.with(|a| a.borrow_mut().take());
    // Dropping the callbacks fails any awaiting `ScriptResult`.
    PENDING.with(|p| p.borrow_mut().clear());
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeShouldOverrideUrlLoading<
    'local,
>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    url: JString<'local>,
) -> jboolean {
    let Some(url) = read_string(&mut env, &url) else {
        return JNI_FALSE;
    };
    let cancel = with_controller(|c| c.should_override_url_loading(&url).overrides_loading())
        .unwrap_or(false);
    if cancel { JNI_TRUE } else { JNI_FALSE }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeOnPageStarted<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    url: JString<'local>,
) {
    let url = read_string(&mut env, &url).unwrap_or_default();
    with_controller(|c| c.on_page_started(&url));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeOnPageFinished<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    url: JString<'local>,
) {
    let url = read_string(&mut env, &url).unwrap_or_default();
    with_controller(|c| c.on_page_finished(&url));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeOnBindingCall<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    object: JString<'local>,
    method: JString<'local>,
    arg: JString<'local>,
) {
    let object = read_string(&mut env, &object).unwrap_or_default();
    let method = read_string(&mut env, &method).unwrap_or_default();
    // JavaScript `null`/`undefined` arrive as a null String.
    let arg = read_string(&mut env, &arg).unwrap_or_else(|| "null".into());
    with_controller(|c| {
        if let Err(e) = c.dispatch_binding(&object, &method, &arg) {
            tracing::warn!(error = %e, "Android: binding call rejected");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeOnEvaluateResult<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    request_id: jlong,
    value: JString<'local>,
) {
    let value = read_string(&mut env, &value).unwrap_or_else(|| "null".into());
    let callback = PENDING.with(|p| p.borrow_mut().remove(&request_id));
    match callback {
        Some(callback) => callback(ScriptValue(value)),
        None => tracing::warn!(request_id, "Android: result for unknown request"),
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeAlertMessage<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    with_controller(|c| {
        if let Err(e) = c.alert_message() {
            c.report_error(&e);
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_hyperpolymath_jsbridge_BridgeHost_nativeRequestResult<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    with_controller(|c| {
        if let Err(e) = c.request_result() {
            c.report_error(&e);
        }
    });
}
