//! WebSocket handler: live draw event fan-out.
//!
//! DESIGN
//! ======
//! The upgrade is authenticated from the `token` cookie the browser sends
//! with the handshake. A connection that fails authentication is upgraded
//! and then closed with code 1008 (policy violation), so browser clients see
//! a close code rather than a bare handshake failure.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → verify cookie token (close 1008 if missing or invalid)
//! 2. Subscribe to the draw broadcast
//! 3. `select!` loop: forward each draw as a JSON text frame; drain and
//!    ignore inbound frames until the client closes
//! 4. Close → drop the subscription

use axum::extract::State;
use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code};
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use wire::TOKEN_COOKIE;

use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, jar: CookieJar, ws: WebSocketUpgrade) -> Response {
    let username = jar
        .get(TOKEN_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .and_then(|token| state.tokens.verify(token).ok());

    ws.on_upgrade(move |socket| async move {
        match username {
            Some(username) => run_ws(socket, state, username).await,
            None => reject(socket).await,
        }
    })
}

async fn reject(mut socket: WebSocket) {
    info!("ws: rejected connection without a valid token");
    let frame = CloseFrame { code: close_code::POLICY, reason: Utf8Bytes::from_static("Invalid token") };
    let _ = socket.send(Message::Close(Some(frame))).await;
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState, username: String) {
    let mut events = state.live.subscribe();
    info!(%username, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(message) => {
                        let text = match message.to_json() {
                            Ok(text) => text,
                            Err(e) => {
                                warn!(error = %e, "ws: failed to encode draw event");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%username, skipped, "ws: subscriber lagged; events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    info!(%username, "ws: client disconnected");
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
