// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability table for the native object exposed to page script.

use std::collections::BTreeMap;

use jsbridge_core::error::{BridgeError, Result};

/// Handler for one script-callable method: takes the string argument the
/// page passed, returns nothing to the page.
pub type BindingHandler = Box<dyn Fn(&str) + 'static>;

/// Methods the page may call on the exposed native object.
///
/// Registration is only open until the first page load; after [`seal`]
/// the set of methods is fixed, matching what the surface was told to
/// expose.
///
/// [`seal`]: BindingTable::seal
#[derive(Default)]
pub struct BindingTable {
    handlers: BTreeMap<String, BindingHandler>,
    sealed: bool,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: &str, handler: BindingHandler) -> Result<()> {
        if self.sealed {
            return Err(BridgeError::BindingsSealed);
        }
        if self.handlers.contains_key(method) {
            return Err(BridgeError::DuplicateBinding(method.to_owned()));
        }
        self.handlers.insert(method.to_owned(), handler);
        Ok(())
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Run the handler for `method`, synchronously with the page's call.
    /// Returns `false` if no such method exists.
    pub fn invoke(&self, method: &str, arg: &str) -> bool {
        match self.handlers.get(method) {
            Some(handler) => {
                handler(arg);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingTable")
            .field("methods", &self.methods())
            .field("sealed", &self.sealed)
            .finish()
    }
}
