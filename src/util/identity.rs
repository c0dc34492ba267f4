//! Current-user identity used to align messages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page injects the signed-in user's email on the mount element.
//! Pages that predate that attribute still render the account dropdown, so
//! the `User: <email>` line under `.dropdown-header` is read as a fallback.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

/// Selector of the account dropdown line carrying `User: <email>`.
pub const LEGACY_IDENTITY_SELECTOR: &str = ".dropdown-header strong + p";

const USER_LABEL_PREFIX: &str = "User:";

/// Extract the email from dropdown text such as `"User: a@b.com"`.
pub fn parse_user_label(text: &str) -> Option<String> {
    let start = text.find(USER_LABEL_PREFIX)? + USER_LABEL_PREFIX.len();
    let rest = text[start..].trim_start();
    let line = rest.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.to_owned())
}

/// Pick the injected identity when present, else the fallback source.
///
/// Returns an empty string when neither yields an email; no message is then
/// treated as the user's own.
pub fn resolve_identity<F>(injected: Option<&str>, fallback: F) -> String
where
    F: FnOnce() -> Option<String>,
{
    if let Some(email) = injected.map(str::trim).filter(|e| !e.is_empty()) {
        return email.to_owned();
    }
    match fallback() {
        Some(email) => email,
        None => {
            leptos::logging::warn!("chat: no current user identity; all messages render as received");
            String::new()
        }
    }
}

/// Read the identity from the legacy account dropdown.
pub fn scrape_identity_from_dom() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let document = web_sys::window()?.document()?;
        let element = document.query_selector(LEGACY_IDENTITY_SELECTOR).ok().flatten()?;
        parse_user_label(&element.text_content()?)
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
