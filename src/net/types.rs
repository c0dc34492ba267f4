//! Wire DTOs for the chat REST API.
//!
//! DESIGN
//! ======
//! Shapes mirror the server's JSON responses. Identifiers keep the JSON type
//! the server issued (integer or string) so request bodies echo them back
//! unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A server-issued identifier for a conversation, user, or message.
///
/// Equality is strict: `Int(5)` and `Text("5")` are different ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Convert a JS number into an id, accepting only finite integral values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        if value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            return Some(Self::Int(value as i64));
        }
        None
    }

    /// Convert a JS string into an id. Blank strings are rejected.
    #[must_use]
    pub fn from_text(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::Text(trimmed.to_owned()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A conversation summary as returned by `GET /chat/conversations`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier.
    pub id: EntityId,
    /// The participant who is not the current user.
    pub other_user_id: EntityId,
    /// Email of the other participant; null when the user row is missing.
    #[serde(default)]
    pub other_user_email: Option<String>,
    /// Creation timestamp as sent by the server.
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub created_at: String,
    /// Timestamp of the latest message, if any.
    #[serde(default)]
    pub last_message_at: Option<String>,
}

impl Conversation {
    /// Email shown in the conversation list.
    #[must_use]
    pub fn display_email(&self) -> &str {
        self.other_user_email.as_deref().unwrap_or_default()
    }

    /// Timestamp used for the list's relative time: last activity, else creation.
    #[must_use]
    pub fn activity_timestamp(&self) -> &str {
        self.last_message_at
            .as_deref()
            .filter(|ts| !ts.is_empty())
            .unwrap_or(self.created_at.as_str())
    }
}

/// A message as returned by `GET /chat/conversations/{id}/messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub sender_id: Option<EntityId>,
    /// Sender email; compared against the current user to pick alignment.
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub timestamp: String,
    #[serde(default)]
    pub is_read: Option<bool>,
}

/// Body of `POST /chat/messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: EntityId,
    pub content: String,
}

/// Response of `POST /chat/messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// Conversation the message landed in; created server-side when new.
    pub conversation_id: EntityId,
    #[serde(default)]
    pub message_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /chat/unread-count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub unread_count: u32,
}

/// Error body the server attaches to non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Ok(u32::try_from(int).unwrap_or(u32::MAX));
            }
            if number.as_i64().is_some() {
                return Ok(0);
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
            {
                return Ok(float.clamp(0.0, f64::from(u32::MAX)) as u32);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
