//! Networking modules for the chat REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls behind the `ChatApi` seam and `types`
//! defines the wire schema shared with the server.

pub mod api;
pub mod types;
