//! Widget configuration read from the mount element's `data-*` attributes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "/chat";
pub const DEFAULT_MESSAGE_POLL_MS: u64 = 3_000;
pub const DEFAULT_UNREAD_POLL_MS: u64 = 10_000;

pub const ATTR_API_BASE: &str = "data-api-base";
pub const ATTR_MESSAGE_POLL_MS: &str = "data-message-poll-ms";
pub const ATTR_UNREAD_POLL_MS: &str = "data-unread-poll-ms";
pub const ATTR_CURRENT_USER_EMAIL: &str = "data-current-user-email";
pub const ATTR_CONTENT_FILTER: &str = "data-content-filter";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    /// Path prefix of the chat endpoints, without trailing slash.
    pub api_base: String,
    /// Interval of the open-conversation message poll.
    pub message_poll: Duration,
    /// Interval of the page-lifetime unread-count poll.
    pub unread_poll: Duration,
    /// Signed-in user's email as injected by the host page.
    pub current_user_email: Option<String>,
    /// Run the pre-send content filter.
    pub content_filter: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            message_poll: Duration::from_millis(DEFAULT_MESSAGE_POLL_MS),
            unread_poll: Duration::from_millis(DEFAULT_UNREAD_POLL_MS),
            current_user_email: None,
            content_filter: false,
        }
    }
}

impl ChatConfig {
    /// Build config from attribute lookups.
    ///
    /// Optional (defaults in parentheses):
    /// - `data-api-base` (`/chat`)
    /// - `data-message-poll-ms` (3000)
    /// - `data-unread-poll-ms` (10000)
    /// - `data-current-user-email` (unset)
    /// - `data-content-filter`: `on`/`true`/`1` enables (off)
    pub fn from_attributes<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = get(ATTR_API_BASE)
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
        let current_user_email = get(ATTR_CURRENT_USER_EMAIL)
            .map(|raw| raw.trim().to_owned())
            .filter(|email| !email.is_empty());

        Self {
            api_base,
            message_poll: parse_millis(get(ATTR_MESSAGE_POLL_MS).as_deref(), DEFAULT_MESSAGE_POLL_MS),
            unread_poll: parse_millis(get(ATTR_UNREAD_POLL_MS).as_deref(), DEFAULT_UNREAD_POLL_MS),
            current_user_email,
            content_filter: parse_flag(get(ATTR_CONTENT_FILTER).as_deref()),
        }
    }
}

fn parse_millis(raw: Option<&str>, default: u64) -> Duration {
    let millis = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default);
    Duration::from_millis(millis)
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}
