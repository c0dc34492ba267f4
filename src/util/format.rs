//! Pure display helpers shared by every chat render path.
//!
//! SYSTEM CONTEXT
//! ==============
//! The conversation list, the message list and the launcher badge all format
//! through these functions, so relative times, escaping and badge capping
//! behave the same everywhere.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Largest unread count shown verbatim on the badge.
pub const BADGE_MAX: u32 = 99;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a server timestamp.
///
/// Accepts RFC 3339, RFC 2822 (`Mon, 01 Jan 2024 12:00:00 GMT`) and naive
/// `YYYY-MM-DD HH:MM:SS[.fff]`, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Relative label for a server timestamp as seen at `now`.
///
/// Unparseable input is returned verbatim.
pub fn format_timestamp(raw: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(raw) {
        Some(then) => format_elapsed(then, now),
        None => raw.to_owned(),
    }
}

/// `Just now`, `Nm ago`, `Nh ago`, `Nd ago`, then a locale date after a week.
pub fn format_elapsed(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds();
    let mins = diff_ms.div_euclid(60_000);
    let hours = diff_ms.div_euclid(3_600_000);
    let days = diff_ms.div_euclid(86_400_000);

    if mins < 1 {
        return "Just now".to_owned();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    if days < 7 {
        return format!("{days}d ago");
    }
    locale_date(then)
}

/// Date-only rendering in the browser's locale.
///
/// Native builds have no locale source and use `M/D/YYYY`.
pub fn locale_date(then: DateTime<Utc>) -> String {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_precision_loss)]
        let millis = then.timestamp_millis() as f64;
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(millis));
        String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
    }
    #[cfg(not(feature = "csr"))]
    {
        then.format("%-m/%-d/%Y").to_string()
    }
}

/// Escape text so it can be placed inside HTML as literal characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Message body as HTML: escaped text with line breaks kept.
pub fn message_html(content: &str) -> String {
    escape_html(content).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Badge text for an unread count, or `None` when the badge should be hidden.
pub fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}

/// Whether a message was sent by the current user.
///
/// An unknown identity never claims a message.
pub fn is_own_message(sender_email: Option<&str>, current_user_email: &str) -> bool {
    !current_user_email.is_empty() && sender_email == Some(current_user_email)
}
