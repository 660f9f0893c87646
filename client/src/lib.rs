//! # client
//!
//! Leptos + WASM frontend for the shared pixel board.
//!
//! The crate is a thin route table (`routes`, mounted by `app::App`) over
//! three views: the connection screen at `/`, the board at `/canvas`, and
//! account registration at `/register`. Views keep their own state in the
//! `state` signals and talk to the server through `net`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
