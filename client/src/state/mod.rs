//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `place`) so each view depends only on
//! the signals it needs. Both are provided as `RwSignal` context by `App`.

pub mod auth;
pub mod place;
