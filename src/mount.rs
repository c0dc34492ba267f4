//! Browser bootstrap: reads config from `#chat-widget`, wires the page-level
//! globals and mounts the widget.

#[cfg(feature = "csr")]
use leptos::logging::{error, log};
#[cfg(feature = "csr")]
use leptos::prelude::*;

/// Id of the host element the widget renders into.
pub const MOUNT_ELEMENT_ID: &str = "chat-widget";

/// Mount the widget if the host page has a `#chat-widget` element.
///
/// Pages without the element (signed-out users) get no widget, no polling
/// and no globals.
#[cfg(feature = "csr")]
pub fn mount_chat_widget() {
    use wasm_bindgen::JsCast;

    use crate::components::chat_widget::ChatWidget;
    use crate::config::ChatConfig;
    use crate::controller::{BrowserHost, ChatController};
    use crate::net::api::HttpChatApi;
    use crate::state::chat::ChatState;
    use crate::util::events::browser::{install_start_chat_global, listen_open_conversation};
    use crate::util::identity::{resolve_identity, scrape_identity_from_dom};

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("chat: no document; widget not mounted");
        return;
    };
    let Some(host) = document.get_element_by_id(MOUNT_ELEMENT_ID) else {
        log!("chat: #{MOUNT_ELEMENT_ID} not found; widget disabled");
        return;
    };

    let config = ChatConfig::from_attributes(|name| host.get_attribute(name));
    let current_user = resolve_identity(config.current_user_email.as_deref(), scrape_identity_from_dom);
    let api = HttpChatApi::new(&config.api_base);
    let chat = RwSignal::new(ChatState::default());
    let controller = ChatController::new(api, chat, BrowserHost, config, &current_user);

    let listener = controller.clone();
    if let Err(e) = listen_open_conversation(move |detail| {
        listener.spawn(move |c| async move { c.handle_open_conversation_event(detail).await });
    }) {
        error!("chat: failed to listen for openConversation: {e}");
    }

    let starter = controller.clone();
    if let Err(e) = install_start_chat_global(move |recipient_id, recipient_email| {
        starter.spawn(move |c| async move {
            c.start_chat_with(recipient_id, recipient_email).await;
        });
    }) {
        error!("chat: failed to install startChatWith: {e}");
    }

    controller.spawn(|c| async move { c.start_unread_polling().await });

    let Ok(host) = host.dyn_into::<web_sys::HtmlElement>() else {
        error!("chat: #{MOUNT_ELEMENT_ID} is not an HTML element");
        return;
    };
    leptos::mount::mount_to(host, move || view! { <ChatWidget controller=controller/> }).forget();
}
