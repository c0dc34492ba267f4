//! Chat widget state: modal visibility, current conversation, messages, and
//! the two poll streams.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ChatState` is owned by one controller. Every transition is a plain
//! method here so the controller only sequences network calls around them,
//! and the rules (send guards, stale-response drops, poll replacement) are
//! testable without a browser.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{Conversation, EntityId, Message, SendMessageRequest};
use crate::util::format::badge_label;
use crate::util::message_filter::{MessageRejection, validate_message};
use crate::util::poll::PollSlot;

/// Modal title while the conversation list is shown.
pub const DEFAULT_TITLE: &str = "Messages";
pub const LOADING_CONVERSATIONS_TEXT: &str = "Loading conversations...";
pub const EMPTY_CONVERSATIONS_TEXT: &str = "No conversations yet. Start chatting with sellers!";
pub const CONVERSATIONS_ERROR_TEXT: &str = "Error loading conversations. Please try again.";
pub const SEND_FAILED_TEXT: &str = "Failed to send message. Please try again.";
pub const START_CHAT_FAILED_TEXT: &str = "Failed to start chat. Please try again.";

/// Placeholder in the message pane before a new conversation's first message.
pub fn compose_placeholder(recipient_email: &str) -> String {
    format!("Start a conversation with {recipient_email}")
}

/// Which pane of the modal is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatView {
    #[default]
    ConversationList,
    MessageView,
}

/// Load state of the conversation list.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConversationListState {
    /// Never requested.
    #[default]
    Idle,
    Loading,
    /// Loaded; may be empty.
    Ready(Vec<Conversation>),
    Failed,
}

/// A message fetch in flight, tagged with the conversation and sequence it
/// was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLoad {
    pub conversation_id: EntityId,
    pub seq: u64,
}

/// Monotonic sequence for message fetches; only the newest issued response
/// that arrives is applied, older ones are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq {
    issued: u64,
    applied: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record `seq` as applied unless a newer response already was.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied || seq > self.issued {
            return false;
        }
        self.applied = seq;
        true
    }
}

/// Outcome of validating the draft before a send.
#[derive(Clone, Debug, PartialEq)]
pub enum SendPlan {
    /// Nothing to send: empty draft, no recipient, or a send in flight.
    Skip,
    /// The content filter refused the draft.
    Reject(MessageRejection),
    Send(SendMessageRequest),
}

/// State for the chat launcher and modal.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub modal_open: bool,
    pub view: ChatView,
    pub conversations: ConversationListState,
    pub current_conversation_id: Option<EntityId>,
    pub current_recipient_id: Option<EntityId>,
    pub current_recipient_email: Option<String>,
    pub messages: Vec<Message>,
    /// Text in the message input.
    pub draft: String,
    /// True while a POST is in flight; disables the send button.
    pub send_pending: bool,
    pub unread_count: u32,
    /// Open-conversation message poll.
    pub message_poll: PollSlot,
    /// Page-lifetime unread-count poll.
    pub unread_poll: PollSlot,
    pub message_seq: RequestSeq,
    /// Bumped whenever the message input should take focus.
    pub focus_rev: u64,
}

impl ChatState {
    /// Title shown in the modal header.
    #[must_use]
    pub fn title(&self) -> &str {
        match (self.view, self.current_recipient_email.as_deref()) {
            (ChatView::MessageView, Some(email)) => email,
            _ => DEFAULT_TITLE,
        }
    }

    /// Badge text, or `None` when the badge is hidden.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        badge_label(self.unread_count)
    }

    /// True when composing to a recipient with no conversation yet.
    #[must_use]
    pub fn is_new_conversation(&self) -> bool {
        self.view == ChatView::MessageView && self.current_conversation_id.is_none()
    }

    #[must_use]
    pub fn is_viewing(&self, conversation_id: &EntityId) -> bool {
        self.view == ChatView::MessageView && self.current_conversation_id.as_ref() == Some(conversation_id)
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    /// Hide the modal and reset to the conversation list.
    ///
    /// The unread poll is left running.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.back_to_conversations();
    }

    /// Show the conversation list and forget the current conversation.
    pub fn back_to_conversations(&mut self) {
        self.view = ChatView::ConversationList;
        self.current_conversation_id = None;
        self.current_recipient_id = None;
        self.current_recipient_email = None;
        self.messages.clear();
        self.message_poll.stop();
    }

    pub fn begin_conversations_load(&mut self) {
        self.conversations = ConversationListState::Loading;
    }

    pub fn apply_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = ConversationListState::Ready(conversations);
    }

    pub fn fail_conversations(&mut self) {
        self.conversations = ConversationListState::Failed;
    }

    /// Switch to the message view of an existing conversation.
    ///
    /// Any running message poll is cancelled; the caller starts a fresh one
    /// once the first load returns.
    pub fn enter_conversation(&mut self, conversation_id: EntityId, recipient_id: EntityId, recipient_email: String) {
        if self.current_conversation_id.as_ref() != Some(&conversation_id) {
            self.messages.clear();
        }
        self.message_poll.stop();
        self.current_conversation_id = Some(conversation_id);
        self.current_recipient_id = Some(recipient_id);
        self.current_recipient_email = Some(recipient_email);
        self.view = ChatView::MessageView;
    }

    /// Switch to the compose view for a recipient without a conversation.
    pub fn start_new_conversation(&mut self, recipient_id: EntityId, recipient_email: String) {
        self.message_poll.stop();
        self.messages.clear();
        self.current_conversation_id = None;
        self.current_recipient_id = Some(recipient_id);
        self.current_recipient_email = Some(recipient_email);
        self.view = ChatView::MessageView;
        self.modal_open = true;
        self.request_focus();
    }

    /// Issue a message fetch for the active conversation, if any.
    pub fn begin_message_load(&mut self) -> Option<MessageLoad> {
        let conversation_id = self.current_conversation_id.clone()?;
        let seq = self.message_seq.issue();
        Some(MessageLoad { conversation_id, seq })
    }

    /// Replace the message list with a fetch result.
    ///
    /// Returns `false` (and changes nothing) when the result is stale: the
    /// conversation changed meanwhile or a newer fetch was already applied.
    pub fn apply_messages(&mut self, load: &MessageLoad, messages: Vec<Message>) -> bool {
        if self.current_conversation_id.as_ref() != Some(&load.conversation_id) {
            return false;
        }
        if !self.message_seq.accept(load.seq) {
            return false;
        }
        self.messages = messages;
        true
    }

    /// Validate the draft and, when it can be sent, mark the send pending.
    pub fn plan_send(&mut self, content_filter: bool) -> SendPlan {
        if self.send_pending {
            return SendPlan::Skip;
        }
        let content = self.draft.trim();
        if content.is_empty() {
            return SendPlan::Skip;
        }
        let Some(recipient_id) = self.current_recipient_id.clone() else {
            return SendPlan::Skip;
        };
        if content_filter {
            if let Err(rejection) = validate_message(content) {
                return SendPlan::Reject(rejection);
            }
        }
        let request = SendMessageRequest { recipient_id, content: content.to_owned() };
        self.send_pending = true;
        SendPlan::Send(request)
    }

    /// Take the conversation id the server assigned to a first message.
    ///
    /// Only applies while still composing to the same recipient without a
    /// conversation. Returns whether the id was adopted.
    pub fn adopt_conversation(&mut self, recipient_id: &EntityId, conversation_id: EntityId) -> bool {
        if self.current_conversation_id.is_some() || self.current_recipient_id.as_ref() != Some(recipient_id) {
            return false;
        }
        self.current_conversation_id = Some(conversation_id);
        true
    }

    /// Clear the input after a successful send, unless the user has already
    /// typed something else.
    pub fn clear_sent_draft(&mut self, sent: &str) {
        if self.draft.trim() == sent {
            self.draft.clear();
        }
    }

    /// End a send regardless of outcome: re-enable the button, refocus input.
    pub fn finish_send(&mut self) {
        self.send_pending = false;
        self.request_focus();
    }

    pub fn set_unread_count(&mut self, count: u32) {
        self.unread_count = count;
    }

    pub fn request_focus(&mut self) {
        self.focus_rev += 1;
    }
}
