//! Conversation list pane.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::controller::BrowserChatController;
use crate::net::types::Conversation;
use crate::state::chat::{
    CONVERSATIONS_ERROR_TEXT, ChatView, ConversationListState, EMPTY_CONVERSATIONS_TEXT, LOADING_CONVERSATIONS_TEXT,
};
use crate::util::format::format_timestamp;

#[component]
pub fn ConversationList() -> impl IntoView {
    let controller = expect_context::<BrowserChatController>();
    let chat = *controller.store();
    let conversations = Memo::new(move |_| chat.with(|s| s.conversations.clone()));
    let visible = Memo::new(move |_| chat.with(|s| s.view == ChatView::ConversationList));

    view! {
        <div
            id="chat-conversations-list"
            class="chat-conversations-list"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            {move || match conversations.get() {
                ConversationListState::Idle | ConversationListState::Loading => {
                    view! { <div class="chat-loading">{LOADING_CONVERSATIONS_TEXT}</div> }.into_any()
                }
                ConversationListState::Failed => {
                    view! { <div class="chat-empty">{CONVERSATIONS_ERROR_TEXT}</div> }.into_any()
                }
                ConversationListState::Ready(list) if list.is_empty() => {
                    view! { <div class="chat-empty">{EMPTY_CONVERSATIONS_TEXT}</div> }.into_any()
                }
                ConversationListState::Ready(list) => {
                    let now = Utc::now();
                    list.into_iter()
                        .map(|conversation| view! { <ConversationItem conversation=conversation now=now/> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

/// One clickable row: other participant's email and last activity.
#[component]
fn ConversationItem(conversation: Conversation, now: DateTime<Utc>) -> impl IntoView {
    let controller = expect_context::<BrowserChatController>();
    let email = conversation.display_email().to_owned();
    let time = format_timestamp(conversation.activity_timestamp(), now);

    let on_click = {
        let email = email.clone();
        move |_| {
            let id = conversation.id.clone();
            let other = conversation.other_user_id.clone();
            let email = email.clone();
            controller.spawn(move |c| async move { c.open_conversation(id, other, email).await });
        }
    };

    view! {
        <div class="chat-conversation-item" on:click=on_click>
            <div class="chat-conversation-email">{email}</div>
            <div class="chat-conversation-time">{time}</div>
        </div>
    }
}
