//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the place REST API, token auth, and the live draw socket,
//! and stitches them with Leptos SSR rendering under a single Axum router.
//! Paths the API does not claim fall through to the Leptos app, which renders
//! the not-found view for anything outside its route table.
//!
//! ERROR HANDLING
//! ==============
//! Handlers return `ApiError`, rendered as `{"detail": "..."}` with the
//! matching status. Each route module maps its service error enum in one
//! function. Body and query extractor rejections convert into `ApiError` too,
//! so malformed input gets the same body shape.

pub mod auth;
pub mod place;
pub mod ws;

use std::path::PathBuf;

use axum::Router;
use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use client::routes::AppRoute;
use wire::ErrorResponse;

use crate::state::AppState;

// =============================================================================
// API ERROR
// =============================================================================

/// Error response with a status and a user-facing `detail`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Could not validate credentials")
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse { detail: self.detail });
        if self.status == StatusCode::UNAUTHORIZED {
            return (self.status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// ROUTERS
// =============================================================================

/// Place API, auth, and the live socket.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/token", post(auth::token))
        .route("/auth/register", post(auth::register))
        .route("/place/username", get(auth::username))
        .route("/api/place/delay", get(place::delay))
        .route("/api/place/board-bitmap", get(place::board_bitmap))
        .route("/api/place/board-bitmap/pixel/", get(place::pixel))
        .route("/api/place/draw", post(place::draw))
        .route("/api/place/last-user-timestamp/", get(place::last_user_timestamp))
        .route("/api/place/board-bitmap/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR for the client views.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .merge(view_routes(&leptos_options)))
}

/// SSR for the client route table, plus the not-found fallback.
///
/// A single trailing slash on a non-root view path redirects to the bare
/// path, so every location that names a view renders it with a 200.
pub(crate) fn view_routes(leptos_options: &LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);

    let mut router: Router<LeptosOptions> = Router::new();
    for route in AppRoute::ALL.into_iter().filter(|r| r.path() != "/") {
        let slashed = format!("{}/", route.path());
        router = router.route(&slashed, get(move || async move { Redirect::permanent(route.path()) }));
    }

    router
        .leptos_routes(leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options.clone())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

#[cfg(test)]
#[path = "test_client.rs"]
pub(crate) mod test_client;
