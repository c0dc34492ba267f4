//! Message pane of the open conversation.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::controller::BrowserChatController;
use crate::net::types::Message;
use crate::state::chat::compose_placeholder;
use crate::util::format::{format_timestamp, is_own_message, message_html};

#[component]
pub fn MessageList() -> impl IntoView {
    let controller = expect_context::<BrowserChatController>();
    let chat = *controller.store();
    let current_user = controller.current_user_email().to_owned();

    let messages = Memo::new(move |_| chat.with(|s| s.messages.clone()));
    let compose_to = Memo::new(move |_| {
        chat.with(|s| {
            s.is_new_conversation()
                .then(|| s.current_recipient_email.clone().unwrap_or_default())
        })
    });
    let container_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move || {
        messages.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = container_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div id="chat-messages-container" class="chat-messages-container" node_ref=container_ref>
            {move || {
                if let Some(email) = compose_to.get() {
                    return view! { <div class="chat-empty">{compose_placeholder(&email)}</div> }.into_any();
                }
                let now = Utc::now();
                messages
                    .get()
                    .into_iter()
                    .map(|message| view! { <MessageItem message=message now=now current_user=current_user.clone()/> })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn MessageItem(message: Message, now: DateTime<Utc>, current_user: String) -> impl IntoView {
    let own = is_own_message(message.sender_email.as_deref(), &current_user);
    let class = if own { "chat-message chat-message-sent" } else { "chat-message chat-message-received" };
    let sender = (!own).then(|| {
        let label = message.sender_email.clone().unwrap_or_default();
        view! { <div class="chat-message-sender">{label}</div> }
    });

    view! {
        <div class=class>
            {sender}
            <div class="chat-message-content" inner_html=message_html(&message.content)></div>
            <div class="chat-message-time">{format_timestamp(&message.timestamp, now)}</div>
        </div>
    }
}
