//! REST API helpers for the chat endpoints.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: every call returns [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get typed `Result`s instead of panics so load failures degrade the
//! widget to an empty/error state and send failures can be shown to the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Conversation, EntityId, Message, SendMessageRequest, SendMessageResponse};
#[cfg(any(test, feature = "csr"))]
use super::types::ErrorBody;
#[cfg(feature = "csr")]
use super::types::UnreadCountResponse;

/// Failure of a chat API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed: {status}{}", reason_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
    #[error("invalid conversation id: {0:?}")]
    InvalidId(String),
}

impl ApiError {
    /// Reason supplied by the server in an `{"error": ...}` body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn reason_suffix(message: &Option<String>) -> String {
    match message {
        Some(reason) => format!(" ({reason})"),
        None => String::new(),
    }
}

/// The four endpoints the widget consumes.
///
/// The browser implementation is [`HttpChatApi`]; tests substitute an
/// in-memory fake.
#[allow(async_fn_in_trait)]
pub trait ChatApi: Clone + 'static {
    /// `GET {base}/conversations`
    async fn conversations(&self) -> Result<Vec<Conversation>, ApiError>;
    /// `GET {base}/conversations/{id}/messages`
    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn messages(&self, conversation_id: &EntityId) -> Result<Vec<Message>, ApiError>;
    /// `POST {base}/messages`
    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn send_message(&self, request: &SendMessageRequest) -> Result<SendMessageResponse, ApiError>;
    /// `GET {base}/unread-count`
    async fn unread_count(&self) -> Result<u32, ApiError>;
}

/// `ChatApi` over `fetch`, rooted at a configurable base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpChatApi {
    base: String,
}

impl HttpChatApi {
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(any(test, feature = "csr"))]
fn conversations_endpoint(base: &str) -> String {
    format!("{base}/conversations")
}

/// Id as a single path segment. Dot segments and blank ids are refused so
/// a page-supplied id cannot step outside `{base}/conversations/`.
#[cfg(any(test, feature = "csr"))]
fn path_segment(id: &EntityId) -> Option<String> {
    match id {
        EntityId::Int(n) => Some(n.to_string()),
        EntityId::Text(text) if text.is_empty() || text == "." || text == ".." => None,
        EntityId::Text(text) => Some(urlencoding::encode(text).into_owned()),
    }
}

#[cfg(any(test, feature = "csr"))]
fn messages_endpoint(base: &str, conversation_id: &EntityId) -> Option<String> {
    let segment = path_segment(conversation_id)?;
    Some(format!("{base}/conversations/{segment}/messages"))
}

#[cfg(any(test, feature = "csr"))]
fn send_endpoint(base: &str) -> String {
    format!("{base}/messages")
}

#[cfg(any(test, feature = "csr"))]
fn unread_endpoint(base: &str) -> String {
    format!("{base}/unread-count")
}

/// Extract the server's `error` reason from a failed response body.
#[cfg(any(test, feature = "csr"))]
fn server_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    let reason = parsed.error.trim();
    if reason.is_empty() {
        return None;
    }
    Some(reason.to_owned())
}

#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let message = match resp.text().await {
            Ok(body) => server_error_message(&body),
            Err(_) => None,
        };
        return Err(ApiError::Status { status, message });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

impl ChatApi for HttpChatApi {
    async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        #[cfg(feature = "csr")]
        {
            get_json(&conversations_endpoint(&self.base)).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn messages(&self, conversation_id: &EntityId) -> Result<Vec<Message>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let url = messages_endpoint(&self.base, conversation_id)
                .ok_or_else(|| ApiError::InvalidId(conversation_id.to_string()))?;
            get_json(&url).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    async fn send_message(&self, request: &SendMessageRequest) -> Result<SendMessageResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&send_endpoint(&self.base))
                .json(request)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn unread_count(&self) -> Result<u32, ApiError> {
        #[cfg(feature = "csr")]
        {
            let body: UnreadCountResponse = get_json(&unread_endpoint(&self.base)).await?;
            Ok(body.unread_count)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}
