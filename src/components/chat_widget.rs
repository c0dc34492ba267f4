//! Root component mounted into `#chat-widget`.

use leptos::prelude::*;

use crate::components::chat_launcher::ChatLauncher;
use crate::components::chat_modal::ChatModal;
use crate::controller::BrowserChatController;

/// Launcher button plus the chat modal, sharing one controller.
#[component]
pub fn ChatWidget(controller: BrowserChatController) -> impl IntoView {
    provide_context(controller);

    view! {
        <ChatLauncher/>
        <ChatModal/>
    }
}
