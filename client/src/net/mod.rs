//! Networking modules for REST calls and the live draw socket.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and `live` manages the WebSocket lifecycle.
//! Request and event schemas come from the shared `wire` crate.

pub mod api;
pub mod live;
