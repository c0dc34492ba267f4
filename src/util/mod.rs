//! Utility helpers shared across the widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (timers, DOM lookups, custom
//! events) and pure formatting from the controller and components so both
//! stay testable natively.

pub mod events;
pub mod format;
pub mod identity;
pub mod message_filter;
pub mod poll;
