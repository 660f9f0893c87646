//! Pixel board routes.

use std::time::Instant;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use wire::{DelayResponse, DrawCommand, MessageResponse, PixelResponse, TimestampResponse};

use super::auth::AuthUser;
use super::{ApiError, ApiResult};
use crate::services::place::{self, PlaceError};
use crate::state::AppState;

pub(crate) fn place_error_to_api(err: PlaceError) -> ApiError {
    let status = match &err {
        PlaceError::Invalid(_) => StatusCode::BAD_REQUEST,
        PlaceError::PixelOutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
        PlaceError::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
        PlaceError::NoTimestamp => StatusCode::NOT_FOUND,
        PlaceError::Database(_) => {
            tracing::error!(error = %err, "place service failure");
            return ApiError::internal();
        }
    };
    ApiError::new(status, err.to_string())
}

#[derive(Deserialize)]
pub struct PixelQuery {
    pub x: i64,
    pub y: i64,
}

/// `GET /api/place/delay`
pub async fn delay(_auth: AuthUser, State(state): State<AppState>) -> Json<DelayResponse> {
    Json(DelayResponse { delay: state.draw_delay.as_secs() })
}

/// `GET /api/place/board-bitmap`: one color index per pixel, row-major.
pub async fn board_bitmap(_auth: AuthUser, State(state): State<AppState>) -> Json<Vec<u8>> {
    Json(place::colors(&state).await)
}

/// `GET /api/place/board-bitmap/pixel/?x=&y=`
pub async fn pixel(
    _auth: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<PixelQuery>, QueryRejection>,
) -> ApiResult<PixelResponse> {
    let Query(query) = query?;
    let color = place::pixel(&state, query.x, query.y).await.map_err(place_error_to_api)?;
    Ok(Json(PixelResponse { pixel_color: Some(color) }))
}

/// `POST /api/place/draw`
pub async fn draw(
    auth: AuthUser,
    State(state): State<AppState>,
    command: Result<Json<DrawCommand>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(command) = command?;
    let started = Instant::now();
    let result = place::draw(&state, &auth.username, command).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(event) => {
            tracing::info!(user = %auth.username, x = event.x, y = event.y, color = event.color, elapsed_ms, "pixel drawn");
            Ok(Json(MessageResponse::new("Pixel updated successfully")))
        }
        Err(e) => {
            tracing::debug!(user = %auth.username, error = %e, elapsed_ms, "draw refused");
            Err(place_error_to_api(e))
        }
    }
}

/// `GET /api/place/last-user-timestamp/`
pub async fn last_user_timestamp(auth: AuthUser, State(state): State<AppState>) -> ApiResult<TimestampResponse> {
    let at = place::last_draw(&state.pool, &auth.username).await.map_err(place_error_to_api)?;
    Ok(Json(TimestampResponse { timestamp: place::format_timestamp(at) }))
}

#[cfg(test)]
#[path = "place_test.rs"]
mod tests;
