// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notice text.
//
// Notices are the only reporting channel of the bridge. Every error maps to
// one short sentence; the page-not-ready text comes from the config so the
// shell can localise it.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::types::Notice;

/// Notice for a string received from the page (URL message or binding call).
pub fn received(config: &BridgeConfig, payload: &str) -> Notice {
    Notice::short(format!("{}{payload}", config.received_notice_prefix))
}

/// Notice shown when a script trigger fires before the page finished loading.
pub fn page_loading(config: &BridgeConfig) -> Notice {
    Notice::short(config.page_loading_notice.clone())
}

/// Convert a `BridgeError` into the notice the shell shows for it.
pub fn humanize_error(config: &BridgeConfig, err: &BridgeError) -> Notice {
    match err {
        BridgeError::PageNotReady => page_loading(config),

        BridgeError::ResultDropped => Notice::short("The page did not answer."),

        BridgeError::PlatformUnavailable => {
            Notice::long("Web content isn't available on this device.")
        }

        BridgeError::Surface(detail) => {
            Notice::long(format!("The web view had a problem. ({detail})"))
        }

        BridgeError::BindingsSealed
        | BridgeError::DuplicateBinding(_)
        | BridgeError::UnknownBinding { .. } => {
            Notice::long(format!("The page called something the app doesn't offer. ({err})"))
        }

        BridgeError::Config(_) | BridgeError::Io(_) | BridgeError::Serialization(_) => {
            Notice::long(format!("Settings could not be read. ({err})"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoticeDuration;

    #[test]
    fn received_notice_contains_payload() {
        let config = BridgeConfig::default();
        let notice = received(&config, "hahaha");
        assert!(notice.text.contains("hahaha"));
        assert_eq!(notice.duration, NoticeDuration::Short);
    }

    #[test]
    fn page_not_ready_uses_configured_text() {
        let config = BridgeConfig {
            page_loading_notice: "still loading…".into(),
            ..BridgeConfig::default()
        };
        let notice = humanize_error(&config, &BridgeError::PageNotReady);
        assert_eq!(notice.text, "still loading…");
    }

    #[test]
    fn unknown_binding_names_the_call() {
        let config = BridgeConfig::default();
        let err = BridgeError::UnknownBinding {
            object: "androidtag".into(),
            method: "vibrate".into(),
        };
        assert!(humanize_error(&config, &err).text.contains("androidtag.vibrate"));
    }
}
