//! Widget UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `ChatState` through the controller provided in Leptos
//! context and route every user action back through it. Element ids and
//! class names are the page's styling contract and must stay stable.

pub mod chat_launcher;
pub mod chat_modal;
pub mod chat_widget;
pub mod conversation_list;
pub mod message_list;
