//! Page-level integration points: the `openConversation` custom event and
//! the `window.startChatWith` global.
//!
//! SYSTEM CONTEXT
//! ==============
//! Other page scripts (e.g. a seller profile's "Message seller" button) call
//! `window.startChatWith(recipientId, recipientEmail)`. When a conversation
//! with that recipient exists, the widget announces it with an
//! `openConversation` event on `document`, and its own listener opens it.
//! Any script may dispatch the same event.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde::{Deserialize, Serialize};

use crate::net::types::EntityId;

/// Name of the custom event dispatched on `document`.
pub const OPEN_CONVERSATION_EVENT: &str = "openConversation";

/// Name of the global installed on `window`.
pub const START_CHAT_GLOBAL: &str = "startChatWith";

/// `detail` payload of the `openConversation` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenConversationDetail {
    pub conversation_id: EntityId,
    pub recipient_id: EntityId,
    pub recipient_email: String,
}

/// Parse an event `detail` serialized as JSON.
///
/// # Errors
///
/// Returns the serde error when required fields are missing or mistyped.
pub fn parse_open_conversation_detail(json: &str) -> Result<OpenConversationDetail, serde_json::Error> {
    serde_json::from_str(json)
}

/// Dispatch `openConversation` on `document`.
pub fn dispatch_open_conversation(detail: &OpenConversationDetail) {
    #[cfg(feature = "csr")]
    {
        if let Err(e) = browser::dispatch(detail) {
            leptos::logging::error!("chat: failed to dispatch {OPEN_CONVERSATION_EVENT}: {e}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        leptos::logging::log!(
            "chat: {OPEN_CONVERSATION_EVENT} for conversation {} (no document)",
            detail.conversation_id
        );
    }
}

#[cfg(feature = "csr")]
pub(crate) mod browser {
    //! `web-sys` glue for the event and the global.

    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;

    use super::{OPEN_CONVERSATION_EVENT, OpenConversationDetail, START_CHAT_GLOBAL, parse_open_conversation_detail};
    use crate::net::types::EntityId;

    fn js_error(value: &JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    pub(crate) fn dispatch(detail: &OpenConversationDetail) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let json = serde_json::to_string(detail).map_err(|e| e.to_string())?;
        let detail_value = js_sys::JSON::parse(&json).map_err(|e| js_error(&e))?;
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail_value);
        let event = web_sys::CustomEvent::new_with_event_init_dict(OPEN_CONVERSATION_EVENT, &init)
            .map_err(|e| js_error(&e))?;
        document.dispatch_event(&event).map_err(|e| js_error(&e))?;
        Ok(())
    }

    /// Convert the loosely typed arguments of `startChatWith` into an id.
    pub(crate) fn entity_id_from_js(value: &JsValue) -> Option<EntityId> {
        if let Some(number) = value.as_f64() {
            return EntityId::from_f64(number);
        }
        value.as_string().as_deref().and_then(EntityId::from_text)
    }

    /// Listen for `openConversation` on `document` for the page lifetime.
    pub(crate) fn listen_open_conversation<F>(on_open: F) -> Result<(), String>
    where
        F: Fn(OpenConversationDetail) + 'static,
    {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let callback = Closure::<dyn Fn(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(custom) = event.dyn_ref::<web_sys::CustomEvent>() else {
                return;
            };
            let json = match js_sys::JSON::stringify(&custom.detail()) {
                Ok(json) => String::from(json),
                Err(e) => {
                    leptos::logging::warn!("chat: unreadable {OPEN_CONVERSATION_EVENT} detail: {}", js_error(&e));
                    return;
                }
            };
            match parse_open_conversation_detail(&json) {
                Ok(detail) => on_open(detail),
                Err(e) => leptos::logging::warn!("chat: invalid {OPEN_CONVERSATION_EVENT} detail: {e}"),
            }
        });
        document
            .add_event_listener_with_callback(OPEN_CONVERSATION_EVENT, callback.as_ref().unchecked_ref())
            .map_err(|e| js_error(&e))?;
        callback.forget();
        Ok(())
    }

    /// Install `window.startChatWith(recipientId, recipientEmail)`.
    ///
    /// Arguments are passed through loosely converted; validation belongs to
    /// the caller.
    pub(crate) fn install_start_chat_global<F>(start: F) -> Result<(), String>
    where
        F: Fn(Option<EntityId>, Option<String>) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let callback = Closure::<dyn Fn(JsValue, JsValue)>::new(move |recipient_id: JsValue, recipient_email: JsValue| {
            start(entity_id_from_js(&recipient_id), recipient_email.as_string());
        });
        js_sys::Reflect::set(&window, &JsValue::from_str(START_CHAT_GLOBAL), callback.as_ref())
            .map_err(|e| js_error(&e))?;
        callback.forget();
        Ok(())
    }
}
