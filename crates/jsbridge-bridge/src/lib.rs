// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! jsbridge — two-way bridge between a native shell and a WebView page.
//!
//! Page → native: navigation to `<prefix><payload>` is cancelled and the
//! payload delivered as a message; a native binding object is exposed in
//! the page's global scope. Native → page: fire-and-forget script
//! execution and evaluation with a single-shot result. Both outbound paths
//! are gated on the page having finished loading.
//!
//! All entry points run on the host's UI thread. Only the [`EventQueue`]
//! is shared with engine threads.

pub mod bindings;
pub mod completion;
pub mod controller;
pub mod events;
pub mod ipc;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(all(feature = "webview", not(target_os = "android")))]
pub mod desktop;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use bindings::BindingTable;
pub use completion::ScriptResult;
pub use controller::{BridgeController, Trigger};
pub use events::{EventQueue, SurfaceEvent};
pub use traits::{NoticeSink, ResultCallback, WebSurface};

use jsbridge_core::error::Result;

/// Returns the web surface that needs no host window.
///
/// On Android this is the `WebView` the host attached through JNI; it is an
/// error to ask before the host did so. Desktop hosts own a window and
/// build a `desktop::WrySurface` over it instead; without one this is the
/// stub.
pub fn platform_surface() -> Result<Box<dyn WebSurface>> {
    #[cfg(target_os = "android")]
    {
        Ok(Box::new(android::AndroidSurface::attached()?))
    }
    #[cfg(not(target_os = "android"))]
    {
        Ok(Box::new(stub::StubSurface))
    }
}
