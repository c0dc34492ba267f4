//! # chat-widget
//!
//! Leptos + WASM chat widget for a marketplace page: a launcher with an
//! unread badge, a modal listing the signed-in user's conversations, and a
//! message pane that polls the open conversation.
//!
//! The server is external. The widget talks to four JSON endpoints under a
//! configurable base (`/chat` by default) and exposes two page-level hooks:
//! `window.startChatWith(recipientId, recipientEmail)` and the
//! `openConversation` custom event on `document`.
//!
//! Build with `--features csr` for the browser. Native builds stub every
//! browser call, which is how the unit tests run.

pub mod components;
pub mod config;
pub mod controller;
pub mod mount;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("chat: logger already initialized");
    }
    mount::mount_chat_widget();
}
