//! Chat controller: sequences network calls around `ChatState` transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The launcher, the modal and the page-level globals all call into one
//! `ChatController`. It owns nothing browser-specific itself: HTTP goes
//! through [`ChatApi`], state through [`ChatStore`], and alerts and custom
//! events through [`ChatHost`]. The browser build plugs in `HttpChatApi`, an
//! `RwSignal<ChatState>` and [`BrowserHost`]; tests plug in fakes.
//!
//! ERROR HANDLING
//! ==============
//! Load failures (conversations, messages, unread count) are logged and
//! leave the UI in an empty or error state. Send and start-chat failures
//! are surfaced through `ChatHost::alert`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use leptos::logging::{error, log, warn};
use leptos::prelude::*;

use crate::config::ChatConfig;
use crate::net::api::{ApiError, ChatApi, HttpChatApi};
use crate::net::types::EntityId;
use crate::state::chat::{ChatState, SEND_FAILED_TEXT, START_CHAT_FAILED_TEXT, SendPlan};
use crate::util::events::{OpenConversationDetail, dispatch_open_conversation};
use crate::util::message_filter::MessageRejection;
use crate::util::poll::spawn_poll;

/// Access to the widget's `ChatState`.
///
/// Both methods return `None` once the backing store is gone (e.g. a
/// disposed signal), in which case the caller drops the update.
pub trait ChatStore: Clone + 'static {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R>;
}

impl ChatStore for RwSignal<ChatState> {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl ChatStore for Rc<RefCell<ChatState>> {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Page-level side effects the controller needs from its host.
pub trait ChatHost: Clone + 'static {
    /// Blocking user-facing error.
    fn alert(&self, message: &str);
    /// Announce an existing conversation so every listener can open it.
    fn open_conversation(&self, detail: &OpenConversationDetail);
}

/// `ChatHost` backed by `window.alert` and a `document` custom event.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

impl ChatHost for BrowserHost {
    fn alert(&self, message: &str) {
        #[cfg(feature = "csr")]
        {
            let shown = web_sys::window().map(|w| w.alert_with_message(message));
            if !matches!(shown, Some(Ok(()))) {
                error!("chat: could not show alert: {message}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            warn!("chat: alert: {message}");
        }
    }

    fn open_conversation(&self, detail: &OpenConversationDetail) {
        dispatch_open_conversation(detail);
    }
}

/// Result of [`ChatController::send_message`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent and nothing was shown.
    Skipped,
    /// The content filter refused the draft before any request.
    Rejected(MessageRejection),
    Sent,
    Failed(ApiError),
}

/// Result of [`ChatController::start_chat_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartChatOutcome {
    /// Recipient id or email missing.
    Invalid,
    /// An existing conversation was announced via `openConversation`.
    Existing(EntityId),
    /// No conversation yet; the compose view is shown.
    New,
    /// The conversation list could not be fetched.
    Failed,
}

/// The controller used by the browser build.
pub type BrowserChatController = ChatController<HttpChatApi, RwSignal<ChatState>, BrowserHost>;

#[derive(Clone)]
pub struct ChatController<A, S, H> {
    api: A,
    store: S,
    host: H,
    config: Arc<ChatConfig>,
    current_user_email: Arc<str>,
}

impl<A: ChatApi, S: ChatStore, H: ChatHost> ChatController<A, S, H> {
    pub fn new(api: A, store: S, host: H, config: ChatConfig, current_user_email: &str) -> Self {
        Self { api, store, host, config: Arc::new(config), current_user_email: Arc::from(current_user_email) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Resolved identity; empty when unknown.
    pub fn current_user_email(&self) -> &str {
        &self.current_user_email
    }

    /// Run an operation on the UI task queue.
    ///
    /// Native builds have no executor; the future is dropped unpolled.
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let fut = op(self.clone());
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(fut);
        #[cfg(not(feature = "csr"))]
        drop(fut);
    }

    pub async fn open_chat(&self) {
        self.store.update_state(ChatState::open_modal);
        self.load_conversations().await;
    }

    /// Hide the modal. The unread poll keeps running.
    pub fn close_chat(&self) {
        self.store.update_state(ChatState::close_modal);
    }

    /// Return to the list and refresh it, so a conversation created by a
    /// first message shows up.
    pub async fn back_to_conversations(&self) {
        self.store.update_state(ChatState::back_to_conversations);
        self.load_conversations().await;
    }

    pub async fn load_conversations(&self) {
        self.store.update_state(ChatState::begin_conversations_load);
        match self.api.conversations().await {
            Ok(conversations) => {
                self.store.update_state(|s| s.apply_conversations(conversations));
            }
            Err(e) => {
                error!("chat: failed to load conversations: {e}");
                self.store.update_state(ChatState::fail_conversations);
            }
        }
    }

    /// Show an existing conversation, load it, then poll it.
    pub async fn open_conversation(&self, conversation_id: EntityId, recipient_id: EntityId, recipient_email: String) {
        self.store.update_state(|s| {
            s.open_modal();
            s.enter_conversation(conversation_id.clone(), recipient_id, recipient_email);
        });
        self.load_messages().await;
        self.start_message_poll(&conversation_id);
    }

    /// `openConversation` listener body.
    pub async fn handle_open_conversation_event(&self, detail: OpenConversationDetail) {
        self.open_conversation(detail.conversation_id, detail.recipient_id, detail.recipient_email)
            .await;
    }

    /// Replace the message poll with one for `conversation_id`, unless the
    /// user has moved on meanwhile.
    fn start_message_poll(&self, conversation_id: &EntityId) {
        let token = self
            .store
            .update_state(|s| s.is_viewing(conversation_id).then(|| s.message_poll.start()))
            .flatten();
        let Some(token) = token else {
            log!("chat: conversation {conversation_id} closed before polling started");
            return;
        };
        let store = self.store.clone();
        let controller = self.clone();
        spawn_poll(
            self.config.message_poll,
            move || store.with_state(|s| s.message_poll.is_current(token)).unwrap_or(false),
            move || {
                let controller = controller.clone();
                async move { controller.load_messages().await }
            },
        );
    }

    /// Refresh the active conversation's messages. No-op without one.
    pub async fn load_messages(&self) {
        let Some(load) = self.store.update_state(ChatState::begin_message_load).flatten() else {
            return;
        };
        match self.api.messages(&load.conversation_id).await {
            Ok(messages) => {
                if self.store.update_state(|s| s.apply_messages(&load, messages)) != Some(true) {
                    log!("chat: dropped stale messages for conversation {}", load.conversation_id);
                }
                self.update_unread_count().await;
            }
            Err(e) => error!("chat: failed to load messages for conversation {}: {e}", load.conversation_id),
        }
    }

    pub async fn send_message(&self) -> SendOutcome {
        let filter = self.config.content_filter;
        let request = match self.store.update_state(|s| s.plan_send(filter)) {
            None | Some(SendPlan::Skip) => return SendOutcome::Skipped,
            Some(SendPlan::Reject(rejection)) => {
                warn!("chat: message rejected: {rejection}");
                self.host.alert(&rejection.to_string());
                return SendOutcome::Rejected(rejection);
            }
            Some(SendPlan::Send(request)) => request,
        };

        let outcome = match self.api.send_message(&request).await {
            Ok(response) => {
                let adopted = self
                    .store
                    .update_state(|s| {
                        let adopted = s.adopt_conversation(&request.recipient_id, response.conversation_id.clone());
                        s.clear_sent_draft(&request.content);
                        adopted
                    })
                    .unwrap_or(false);
                self.load_messages().await;
                if adopted {
                    self.start_message_poll(&response.conversation_id);
                }
                SendOutcome::Sent
            }
            Err(e) => {
                error!("chat: failed to send message: {e}");
                self.host.alert(e.server_message().unwrap_or(SEND_FAILED_TEXT));
                SendOutcome::Failed(e)
            }
        };
        self.store.update_state(ChatState::finish_send);
        outcome
    }

    /// Refresh the unread badge. Failures are logged only.
    pub async fn update_unread_count(&self) {
        match self.api.unread_count().await {
            Ok(count) => {
                self.store.update_state(|s| s.set_unread_count(count));
            }
            Err(e) => warn!("chat: failed to update unread count: {e}"),
        }
    }

    /// Check the unread count now and then for the widget's lifetime.
    pub async fn start_unread_polling(&self) {
        if let Some(token) = self.store.update_state(|s| s.unread_poll.start()) {
            let store = self.store.clone();
            let controller = self.clone();
            spawn_poll(
                self.config.unread_poll,
                move || store.with_state(|s| s.unread_poll.is_current(token)).unwrap_or(false),
                move || {
                    let controller = controller.clone();
                    async move { controller.update_unread_count().await }
                },
            );
        }
        self.update_unread_count().await;
    }

    /// `window.startChatWith` body: open the conversation with a recipient,
    /// or the compose view when there is none yet.
    pub async fn start_chat_with(
        &self,
        recipient_id: Option<EntityId>,
        recipient_email: Option<String>,
    ) -> StartChatOutcome {
        let recipient_email = recipient_email.map(|e| e.trim().to_owned()).filter(|e| !e.is_empty());
        let (Some(recipient_id), Some(recipient_email)) = (recipient_id, recipient_email) else {
            error!("chat: Recipient ID and email are required");
            return StartChatOutcome::Invalid;
        };

        self.store.update_state(|s| {
            s.open_modal();
            s.begin_conversations_load();
        });
        let conversations = match self.api.conversations().await {
            Ok(conversations) => conversations,
            Err(e @ ApiError::Status { .. }) => {
                warn!("chat: could not look up conversations for {recipient_email}: {e}");
                self.store.update_state(ChatState::fail_conversations);
                return StartChatOutcome::Failed;
            }
            Err(e) => {
                error!("chat: failed to start chat with {recipient_email}: {e}");
                self.store.update_state(ChatState::fail_conversations);
                self.host.alert(START_CHAT_FAILED_TEXT);
                return StartChatOutcome::Failed;
            }
        };

        let existing = conversations
            .iter()
            .find(|c| c.other_user_id == recipient_id)
            .map(|c| c.id.clone());
        self.store.update_state(|s| s.apply_conversations(conversations));

        match existing {
            Some(conversation_id) => {
                self.host.open_conversation(&OpenConversationDetail {
                    conversation_id: conversation_id.clone(),
                    recipient_id,
                    recipient_email,
                });
                StartChatOutcome::Existing(conversation_id)
            }
            None => {
                self.store.update_state(|s| s.start_new_conversation(recipient_id, recipient_email));
                StartChatOutcome::New
            }
        }
    }
}
