//! Canvas view: the shared board, palette, and live status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounting this view opens the live socket, loads the bitmap, delay, and
//! this user's last draw time, and starts a clock tick for the cooldown
//! badge. Each live reconnect refetches the bitmap. Unmounting stops the
//! socket and forgets the board.
//!
//! DESIGN
//! ======
//! Draws are optimistic: the pixel is painted and the cooldown starts before
//! the server answers. A refusal restores the cooldown from the server's
//! answer and re-reads the pixel so the board converges.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;
use wire::DrawCommand;

use crate::components::color_palette::ColorPalette;
use crate::components::pixel_canvas::PixelCanvas;
use crate::components::status_bar::StatusBar;
use crate::net::api::DrawFailure;
use crate::routes::AppRoute;
use crate::state::auth::AuthState;
use crate::state::place::PlaceState;
use crate::util::auth::{install_unauth_redirect, sign_out};
use crate::util::cooldown::now_ms;

#[cfg(feature = "hydrate")]
const CLOCK_TICK_MS: u64 = 200;

/// Build the request body for a picked cell.
#[must_use]
pub fn draw_command(x: u32, y: u32, color: u8) -> DrawCommand {
    DrawCommand {
        x: i64::from(x),
        y: i64::from(y),
        color: i64::from(color),
    }
}

/// Inline message for a refused draw. `None` when the view handles it by
/// leaving (an expired session).
#[must_use]
pub fn draw_failure_message(failure: &DrawFailure) -> Option<String> {
    match failure {
        DrawFailure::Cooldown { remaining_secs } => {
            Some(crate::util::cooldown::wait_message(remaining_secs * 1000.0))
        }
        DrawFailure::Unauthorized => None,
        DrawFailure::Rejected(reason) => Some(format!("Draw failed: {reason}")),
    }
}

#[component]
pub fn CanvasPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let place = expect_context::<RwSignal<PlaceState>>();
    let navigate = use_navigate();
    let now = RwSignal::new(now_ms());

    install_unauth_redirect(auth, navigate);

    #[cfg(feature = "hydrate")]
    {
        let live = std::sync::Arc::new(std::sync::Mutex::new(None::<crate::net::live::LiveHandle>));
        let live_start = live.clone();
        let started = RwSignal::new(false);
        let on_reconnect = Callback::new(move |()| resync_board(auth, place));
        Effect::new(move || {
            let Some(token) = auth.with(|a| a.token.clone()) else {
                return;
            };
            if started.get_untracked() {
                return;
            }
            started.set(true);
            // Socket first: events that beat the bitmap are queued in `PlaceState`.
            let handle = crate::net::live::spawn_live_client(place, on_reconnect);
            if let Ok(mut slot) = live_start.lock() {
                *slot = Some(handle);
            }
            load_board(token, auth, place);
        });

        let clock_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let clock_alive_task = clock_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(CLOCK_TICK_MS)).await;
                if !clock_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                now.set(now_ms());
            }
        });

        on_cleanup(move || {
            clock_alive.store(false, std::sync::atomic::Ordering::Relaxed);
            if let Some(handle) = live.lock().ok().and_then(|mut slot| slot.take()) {
                handle.stop();
            }
            place.update(PlaceState::reset_board);
        });
    }

    let on_pick = Callback::new(move |(x, y): (u32, u32)| {
        #[cfg(feature = "hydrate")]
        pick_cell(x, y, auth, place);
        #[cfg(not(feature = "hydrate"))]
        let _ = (x, y);
    });

    let on_sign_out = move |_| sign_out(auth);

    view! {
        <Title text=AppRoute::Canvas.title()/>
        <div class="place-page">
            <header class="place-header">
                <h1>"Place"</h1>
                <button class="btn" on:click=on_sign_out>"Sign out"</button>
            </header>
            <StatusBar now_ms=now/>
            <Show when=move || !place.with(|p| p.loaded)>
                <p class="place-loading">"Loading board..."</p>
            </Show>
            <PixelCanvas on_pick=on_pick/>
            <ColorPalette/>
            {move || place.with(|p| p.message.clone()).map(|text| view! { <p class="place-message">{text}</p> })}
        </div>
    }
}

/// Fetch the session's username, delay, bitmap, and cooldown anchor.
#[cfg(feature = "hydrate")]
fn load_board(token: String, auth: RwSignal<AuthState>, place: RwSignal<PlaceState>) {
    use crate::net::api;

    leptos::task::spawn_local(async move {
        let Some(username) = api::fetch_username(&token).await else {
            leptos::logging::warn!("token rejected; signing out");
            sign_out(auth);
            return;
        };
        auth.update(|a| a.username = Some(username));

        match api::fetch_delay(&token).await {
            Ok(delay) => place.update(|p| p.delay_secs = delay),
            Err(e) => leptos::logging::warn!("delay fetch failed: {e}"),
        }

        fetch_bitmap(&token, place).await;

        if let Some(ms) = api::fetch_last_draw_timestamp(&token)
            .await
            .and_then(|ts| crate::util::cooldown::timestamp_ms(&ts))
        {
            place.update(|p| p.record_draw(ms));
        }
    });
}

#[cfg(feature = "hydrate")]
async fn fetch_bitmap(token: &str, place: RwSignal<PlaceState>) {
    match crate::net::api::fetch_board_bitmap(token).await {
        Ok(colors) => place.update(|p| p.load_bitmap(colors)),
        Err(e) => place.update(|p| p.message = Some(format!("Could not load the board: {e}"))),
    }
}

/// Refetch the bitmap after the live socket reconnects; the live client has
/// already marked the board stale.
#[cfg(feature = "hydrate")]
fn resync_board(auth: RwSignal<AuthState>, place: RwSignal<PlaceState>) {
    let Some(token) = auth.with_untracked(|a| a.token.clone()) else {
        return;
    };
    leptos::logging::log!("live socket reconnected; refetching board");
    leptos::task::spawn_local(async move { fetch_bitmap(&token, place).await });
}

/// Handle a click on the board: optimistic paint, then the draw request.
#[cfg(feature = "hydrate")]
fn pick_cell(x: u32, y: u32, auth: RwSignal<AuthState>, place: RwSignal<PlaceState>) {
    use crate::net::api;

    let Some(token) = auth.with_untracked(|a| a.token.clone()) else {
        return;
    };
    let now = now_ms();
    let (ready, remaining, color, previous_draw, previous_color) = place.with_untracked(|p| {
        (p.can_draw(now), p.cooldown_remaining_ms(now), p.selected_color, p.last_draw_ms, p.color_at(x, y))
    });
    if !ready {
        place.update(|p| p.message = Some(crate::util::cooldown::wait_message(remaining)));
        return;
    }

    place.update(|p| {
        p.set_pixel(x, y, color);
        p.record_draw(now);
        p.message = None;
    });

    leptos::task::spawn_local(async move {
        let Err(failure) = api::draw(&token, draw_command(x, y, color)).await else {
            return;
        };
        let message = draw_failure_message(&failure);
        match failure {
            DrawFailure::Unauthorized => {
                sign_out(auth);
                return;
            }
            DrawFailure::Cooldown { remaining_secs } => {
                place.update(|p| p.restore_cooldown(remaining_secs, now_ms()));
            }
            DrawFailure::Rejected(_) => {
                place.update(|p| p.last_draw_ms = previous_draw);
            }
        }
        place.update(|p| p.message = message);

        match api::fetch_pixel(&token, x, y).await {
            Ok(Some(server_color)) => place.update(|p| {
                p.set_pixel(x, y, server_color);
            }),
            Ok(None) => {}
            Err(e) => {
                leptos::logging::warn!("pixel resync failed: {e}");
                if let Some(previous) = previous_color {
                    place.update(|p| {
                        p.set_pixel(x, y, previous);
                    });
                }
            }
        }
    });
}
