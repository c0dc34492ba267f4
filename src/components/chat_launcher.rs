//! Floating launcher button with the unread badge.

use leptos::prelude::*;

use crate::controller::BrowserChatController;
use crate::state::chat::ChatState;

#[component]
pub fn ChatLauncher() -> impl IntoView {
    let controller = expect_context::<BrowserChatController>();
    let chat = *controller.store();
    let badge = Memo::new(move |_| chat.with(ChatState::badge));

    let on_open = move |_| controller.spawn(|c| async move { c.open_chat().await });

    view! {
        <button id="open-chat-btn" class="chat-launcher" type="button" title="Messages" on:click=on_open>
            <span class="chat-launcher__icon">"💬"</span>
            <span
                id="chat-unread-badge"
                class="chat-unread-badge"
                style:display=move || if badge.with(Option::is_some) { "flex" } else { "none" }
            >
                {move || badge.get().unwrap_or_default()}
            </span>
        </button>
    }
}
