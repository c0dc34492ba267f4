//! Optional pre-send content check.
//!
//! The marketplace forbids moving buyers off-platform, so contact details are
//! rejected before they reach the server: phone numbers, email addresses,
//! links and social-media handles. Enabled per page with
//! `data-content-filter`.

#[cfg(test)]
#[path = "message_filter_test.rs"]
mod message_filter_test;

use std::sync::LazyLock;

use regex::Regex;

/// Longest message accepted, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Why a draft was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MessageRejection {
    #[error("Message cannot be empty")]
    Empty,
    #[error("Message cannot exceed {max} characters")]
    TooLong { max: usize },
    #[error("Phone numbers are not allowed. Please use the platform's messaging system only.")]
    PhoneNumber,
    #[error("Email addresses are not allowed. Please use the platform's messaging system only.")]
    EmailAddress,
    #[error("Links are not allowed for security reasons.")]
    Link,
    #[error("Social media links/handles are not allowed.")]
    SocialHandle,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                leptos::logging::error!("chat: content filter pattern {pattern:?} skipped: {e}");
                None
            }
        })
        .collect()
}

static PHONE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\+?\d{10,}",
        r"\+27\s?\d{9}",
        r"0\d{9}",
        r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
        r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}",
    ])
});

static EMAIL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        r"\w+\s*@\s*\w+\s*\.\s*\w+",
    ])
});

static LINK: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[r"https?://[^\s]+", r"www\.[^\s]+", r"\w+\.\w{2,}/[^\s]*"])
});

static SOCIAL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"@[a-zA-Z0-9_]+",
        r"facebook\.com/[^\s]+",
        r"instagram\.com/[^\s]+",
        r"whatsapp\.me/[^\s]+",
        r"wa\.me/[^\s]+",
        r"telegram\.me/[^\s]+",
        r"t\.me/[^\s]+",
    ])
});

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

/// Check a draft against the length and contact-detail rules.
///
/// # Errors
///
/// Returns the first rule the draft breaks, checked in the order length,
/// phone, email, link, social handle.
pub fn validate_message(text: &str) -> Result<(), MessageRejection> {
    if text.trim().is_empty() {
        return Err(MessageRejection::Empty);
    }
    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(MessageRejection::TooLong { max: MAX_MESSAGE_CHARS });
    }
    if any_match(&PHONE, text) {
        return Err(MessageRejection::PhoneNumber);
    }
    if any_match(&EMAIL, text) {
        return Err(MessageRejection::EmailAddress);
    }
    if any_match(&LINK, text) {
        return Err(MessageRejection::Link);
    }
    if any_match(&SOCIAL, text) {
        return Err(MessageRejection::SocialHandle);
    }
    Ok(())
}
