//! Chat modal: header, conversation list, message pane and input row.

use leptos::prelude::*;

use crate::components::conversation_list::ConversationList;
use crate::components::message_list::MessageList;
use crate::controller::BrowserChatController;
use crate::state::chat::ChatView;

fn display(visible: bool, shown: &'static str) -> &'static str {
    if visible { shown } else { "none" }
}

#[component]
pub fn ChatModal() -> impl IntoView {
    let controller = expect_context::<BrowserChatController>();
    let chat = *controller.store();

    let is_open = Memo::new(move |_| chat.with(|s| s.modal_open));
    let in_messages = Memo::new(move |_| chat.with(|s| s.view == ChatView::MessageView));
    let title = Memo::new(move |_| chat.with(|s| s.title().to_owned()));
    let pending = Memo::new(move |_| chat.with(|s| s.send_pending));
    let draft = Memo::new(move |_| chat.with(|s| s.draft.clone()));
    let focus_rev = Memo::new(move |_| chat.with(|s| s.focus_rev));

    let input_ref = NodeRef::<leptos::html::Textarea>::new();

    Effect::new(move || {
        if focus_rev.get() == 0 {
            return;
        }

        #[cfg(feature = "csr")]
        {
            if let Some(el) = input_ref.get() {
                if el.focus().is_err() {
                    leptos::logging::warn!("chat: could not focus message input");
                }
            }
        }
    });

    let on_close = {
        let controller = controller.clone();
        move |_| controller.close_chat()
    };
    let on_back = {
        let controller = controller.clone();
        move |_| controller.spawn(|c| async move { c.back_to_conversations().await })
    };
    let send = Callback::new(move |()| {
        controller.spawn(|c| async move {
            c.send_message().await;
        });
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send.run(());
        }
    };

    view! {
        <div id="chat-modal" class="chat-modal" style:display=move || display(is_open.get(), "flex")>
            <div class="chat-modal__content">
                <div class="chat-modal__header">
                    <button
                        id="back-to-conversations"
                        class="chat-modal__back"
                        type="button"
                        title="Back to conversations"
                        style:display=move || display(in_messages.get(), "block")
                        on:click=on_back
                    >
                        "←"
                    </button>
                    <h3 id="chat-title" class="chat-modal__title">{move || title.get()}</h3>
                    <button id="close-chat" class="chat-modal__close" type="button" title="Close chat" on:click=on_close>
                        "✕"
                    </button>
                </div>

                <div class="chat-modal__body">
                    <ConversationList/>
                    <div
                        id="chat-messages-view"
                        class="chat-messages-view"
                        style:display=move || display(in_messages.get(), "flex")
                    >
                        <MessageList/>
                    </div>
                </div>

                <div
                    id="chat-input-container"
                    class="chat-input-container"
                    style:display=move || display(in_messages.get(), "flex")
                >
                    <textarea
                        id="chat-message-input"
                        class="chat-message-input"
                        rows="1"
                        placeholder="Type a message..."
                        node_ref=input_ref
                        prop:value=move || draft.get()
                        on:input=move |ev| chat.update(|s| s.draft = event_target_value(&ev))
                        on:keydown=on_keydown
                    ></textarea>
                    <button
                        id="send-message-btn"
                        class="chat-send-btn"
                        type="button"
                        disabled=move || pending.get()
                        on:click=move |_| send.run(())
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </div>
    }
}
