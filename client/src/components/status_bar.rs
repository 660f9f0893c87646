//! Status strip under the board: live connection, cooldown, and signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders low-frequency canvas telemetry so users can tell whether their
//! next click will be accepted and whether other users' draws are arriving.

#[cfg(test)]
#[path = "status_bar_test.rs"]
mod status_bar_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::place::{ConnectionStatus, PlaceState};
use crate::util::cooldown::format_cooldown;

fn connection_status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Live",
        ConnectionStatus::Connecting => "Connecting",
        ConnectionStatus::Disconnected => "Offline",
    }
}

fn connection_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "status-dot status-dot--connected",
        ConnectionStatus::Connecting => "status-dot status-dot--connecting",
        ConnectionStatus::Disconnected => "status-dot status-dot--disconnected",
    }
}

/// Status bar at the bottom of the canvas view. `now_ms` drives the cooldown countdown.
#[component]
pub fn StatusBar(#[prop(into)] now_ms: Signal<f64>) -> impl IntoView {
    let place = expect_context::<RwSignal<PlaceState>>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let status = move || place.with(|p| p.connection_status);
    let cooldown = move || format_cooldown(place.with(|p| p.cooldown_remaining_ms(now_ms.get())));
    let username = move || auth.with(|a| a.username.clone()).unwrap_or_default();

    view! {
        <footer class="status-bar">
            <span class=move || connection_status_class(status())></span>
            <span class="status-bar__item">{move || connection_status_label(status())}</span>
            <span class="status-bar__item">"Next pixel: " {cooldown}</span>
            <span class="status-bar__item status-bar__user">{username}</span>
        </footer>
    }
}
