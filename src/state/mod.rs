//! Client-side widget state.
//!
//! DESIGN
//! ======
//! State is a plain struct mutated through small transition methods; the
//! browser wraps it in a Leptos `RwSignal` and the controller reaches it
//! through the `ChatStore` seam.

pub mod chat;
