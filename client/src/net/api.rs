//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Error strings
//! carry the server's `detail` when it sent one, so views can show it as is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
#[cfg(any(test, feature = "hydrate"))]
use wire::ErrorResponse;
use wire::{DrawCommand, TokenResponse};

#[cfg(any(test, feature = "hydrate"))]
use crate::util::cooldown::parse_wait_seconds;

#[cfg(any(test, feature = "hydrate"))]
const GREETING_PREFIX: &str = "Hello ";

/// Why a draw request did not go through.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawFailure {
    /// The user drew too recently; retry after this many seconds.
    Cooldown { remaining_secs: f64 },
    /// The token is missing, expired, or rejected.
    Unauthorized,
    /// Anything else, with a displayable reason.
    Rejected(String),
}

#[derive(Serialize)]
struct LoginForm<'a> {
    grant_type: &'a str,
    username: &'a str,
    password: &'a str,
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn pixel_endpoint(x: u32, y: u32) -> String {
    format!("/api/place/board-bitmap/pixel/?x={x}&y={y}")
}

/// `application/x-www-form-urlencoded` body for `POST /auth/token`.
fn login_form_body(username: &str, password: &str) -> Result<String, String> {
    let form = LoginForm { grant_type: "password", username, password };
    serde_urlencoded::to_string(&form).map_err(|e| e.to_string())
}

/// Best human-readable reason from an error response body.
#[cfg(any(test, feature = "hydrate"))]
fn error_detail(status: u16, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return err.detail;
    }
    let text = body.trim();
    if text.is_empty() { format!("request failed: {status}") } else { text.to_owned() }
}

#[cfg(any(test, feature = "hydrate"))]
fn classify_draw_failure(status: u16, detail: String) -> DrawFailure {
    match status {
        401 => DrawFailure::Unauthorized,
        429 => match parse_wait_seconds(&detail) {
            Some(remaining_secs) => DrawFailure::Cooldown { remaining_secs },
            None => DrawFailure::Rejected(detail),
        },
        _ => DrawFailure::Rejected(detail),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn username_from_greeting(message: &str) -> Option<String> {
    message
        .strip_prefix(GREETING_PREFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

/// Exchange credentials for an access token via `POST /auth/token`.
///
/// The server also sets the `token` cookie on success.
///
/// # Errors
///
/// Returns the server's detail (e.g. "Incorrect username or password") or
/// the transport error.
pub async fn login(username: &str, password: &str) -> Result<TokenResponse, String> {
    let body = login_form_body(username, password)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/auth/token")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_detail(resp.status(), &text));
        }
        resp.json::<TokenResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err("not available on server".to_owned())
    }
}

/// Create an account via `POST /auth/register`.
///
/// # Errors
///
/// Returns the server's detail (e.g. "Username already taken") or the
/// transport error.
pub async fn register(username: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = wire::Credentials { username: username.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/auth/register")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_detail(resp.status(), &text));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err("not available on server".to_owned())
    }
}

/// Confirm a token and learn its username via `GET /place/username`.
/// Returns `None` if the token is rejected or on the server.
pub async fn fetch_username(token: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/place/username")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        let body = resp.json::<wire::MessageResponse>().await.ok()?;
        username_from_greeting(&body.message)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        None
    }
}

/// Fetch the whole board from `GET /api/place/board-bitmap`.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is not a color list.
pub async fn fetch_board_bitmap(token: &str) -> Result<Vec<u8>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/place/board-bitmap")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_detail(resp.status(), &text));
        }
        resp.json::<Vec<u8>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available on server".to_owned())
    }
}

/// Fetch the per-user draw delay (seconds) from `GET /api/place/delay`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_delay(token: &str) -> Result<u64, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/place/delay")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_detail(resp.status(), &text));
        }
        let body: wire::DelayResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.delay)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available on server".to_owned())
    }
}

/// Read a single pixel via `GET /api/place/board-bitmap/pixel/`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn fetch_pixel(token: &str, x: u32, y: u32) -> Result<Option<u8>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&pixel_endpoint(x, y))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_detail(resp.status(), &text));
        }
        let body: wire::PixelResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.pixel_color)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, x, y);
        Err("not available on server".to_owned())
    }
}

/// Paint one pixel via `POST /api/place/draw`.
///
/// # Errors
///
/// Returns a [`DrawFailure`] describing why the draw was refused.
pub async fn draw(token: &str, command: DrawCommand) -> Result<(), DrawFailure> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/place/draw")
            .header("Authorization", &bearer(token))
            .json(&command)
            .map_err(|e| DrawFailure::Rejected(e.to_string()))?
            .send()
            .await
            .map_err(|e| DrawFailure::Rejected(e.to_string()))?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(classify_draw_failure(resp.status(), error_detail(resp.status(), &text)));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, command);
        Err(DrawFailure::Rejected("not available on server".to_owned()))
    }
}

/// Fetch this user's last accepted draw time (RFC 3339) from
/// `GET /api/place/last-user-timestamp/`. `None` if the user never drew.
pub async fn fetch_last_draw_timestamp(token: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/place/last-user-timestamp/")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        let body: wire::TimestampResponse = resp.json().await.ok()?;
        Some(body.timestamp)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        None
    }
}
