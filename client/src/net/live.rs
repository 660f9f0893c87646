//! Live draw socket for `/api/place/board-bitmap/ws`.
//!
//! The server authenticates the upgrade from the `token` cookie, then pushes
//! one JSON text frame per accepted draw. This module keeps a socket open
//! while the canvas view is mounted: connect, apply events to `PlaceState`,
//! and reconnect with exponential backoff until stopped. Draws broadcast
//! while the socket was down are never replayed by the server, so every
//! reconnect marks the board stale and asks the caller to refetch it.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Malformed or unknown messages are dropped. Transport failures only flip
//! the connection status; the reconnect loop recovers.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use wire::{DrawEvent, LiveMessage};

#[cfg(feature = "hydrate")]
use crate::state::place::{ConnectionStatus, PlaceState};
#[cfg(feature = "hydrate")]
use leptos::prelude::{Callable, Callback, RwSignal, Update};

/// Path of the live draw endpoint.
pub const LIVE_PATH: &str = "/api/place/board-bitmap/ws";

#[cfg(feature = "hydrate")]
const INITIAL_BACKOFF_MS: u32 = 1000;
const MAX_BACKOFF_MS: u32 = 10_000;

/// Build the socket URL from the page's `href` and `host`.
#[must_use]
pub fn live_socket_url(href: &str, host: &str) -> String {
    let proto = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{proto}://{host}{LIVE_PATH}")
}

/// Decode a text frame into a draw event. Anything else yields `None`.
#[must_use]
pub fn parse_live_message(text: &str) -> Option<DrawEvent> {
    match LiveMessage::from_json(text) {
        Ok(LiveMessage::Draw(event)) => Some(event),
        Err(_) => None,
    }
}

/// Next reconnect delay: doubles, capped at ten seconds.
#[must_use]
pub fn next_backoff_ms(current: u32) -> u32 {
    current.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Stops the live client when dropped or when [`LiveHandle::stop`] is called.
#[cfg(feature = "hydrate")]
pub struct LiveHandle {
    stop: Option<futures::channel::oneshot::Sender<()>>,
}

#[cfg(feature = "hydrate")]
impl LiveHandle {
    pub fn stop(mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawn the live socket lifecycle as a local async task.
///
/// `on_reconnect` runs after every successful connection but the first, once
/// the board has been marked stale.
#[cfg(feature = "hydrate")]
pub fn spawn_live_client(place: RwSignal<PlaceState>, on_reconnect: Callback<()>) -> LiveHandle {
    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    leptos::task::spawn_local(live_client_loop(place, on_reconnect, rx));
    LiveHandle { stop: Some(tx) }
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn live_client_loop(
    place: RwSignal<PlaceState>,
    on_reconnect: Callback<()>,
    mut stop: futures::channel::oneshot::Receiver<()>,
) {
    use futures::future::{Either, select};

    let mut backoff_ms = INITIAL_BACKOFF_MS;
    let mut reconnecting = false;

    loop {
        place.update(|p| p.connection_status = ConnectionStatus::Connecting);

        let href = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        let url = live_socket_url(&href, &host);

        let on_open = reconnecting.then_some(on_reconnect);
        reconnecting = true;

        match select(Box::pin(connect_and_run(&url, place, on_open)), &mut stop).await {
            Either::Left((Ok(()), _)) => {
                leptos::logging::log!("live socket closed");
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            Either::Left((Err(e), _)) => {
                leptos::logging::warn!("live socket error: {e}");
            }
            Either::Right(_) => break,
        }

        place.update(|p| p.connection_status = ConnectionStatus::Disconnected);

        let sleep = gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms)));
        if let Either::Right(_) = select(Box::pin(sleep), &mut stop).await {
            break;
        }
        backoff_ms = next_backoff_ms(backoff_ms);
    }

    place.update(|p| p.connection_status = ConnectionStatus::Disconnected);
}

/// Connect to the socket and apply events until it closes.
#[cfg(feature = "hydrate")]
async fn connect_and_run(url: &str, place: RwSignal<PlaceState>, on_open: Option<Callback<()>>) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (_write, mut read) = ws.split();

    place.update(|p| p.connection_status = ConnectionStatus::Connected);
    if let Some(resync) = on_open {
        place.update(PlaceState::begin_resync);
        resync.run(());
    }

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Some(event) = parse_live_message(&text) {
                    place.update(|p| {
                        p.apply_draw(&event);
                    });
                }
            }
            Ok(Message::Bytes(_)) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}
