//! Pixel board service: draws, reads, and the per-user cooldown.
//!
//! SYSTEM CONTEXT
//! ==============
//! The in-memory `Bitmap` in `AppState` is the read model every REST read and
//! every new client sees. Postgres holds the durable history (`tiles`) and
//! each user's last accepted draw (`last_tile_timestamp`). On startup the
//! bitmap is rebuilt from the newest tile per cell.
//!
//! DESIGN
//! ======
//! A draw claims the user's cooldown slot with one conditional upsert, so two
//! concurrent draws from the same user cannot both pass. Only after the tile
//! commits does the bitmap change and the event go out to live subscribers.
//! The board write lock spans the tile insert, so the newest tile per cell
//! is always the color in memory.

#[cfg(test)]
#[path = "place_test.rs"]
mod tests;

use std::time::Duration;

use sqlx::PgPool;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use wire::{DrawCommand, DrawError, DrawEvent, LiveMessage, pixel_index};

use crate::services::bitmap::Bitmap;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    #[error(transparent)]
    Invalid(#[from] DrawError),
    #[error("Coordinates out of bounds")]
    PixelOutOfRange,
    #[error("Please wait {remaining_secs:.2} seconds before drawing again")]
    Cooldown { remaining_secs: f64 },
    #[error("No timestamp found for user")]
    NoTimestamp,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// TIME
// =============================================================================

pub(crate) fn to_ms(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

pub(crate) fn from_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

/// RFC 3339 rendering used in API bodies and draw events.
pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}

fn delay_ms(delay: Duration) -> i64 {
    i64::try_from(delay.as_millis()).unwrap_or(i64::MAX)
}

/// Seconds left before a user whose last draw was at `last_ms` may draw
/// again, or `None` if the cooldown has passed. A last draw that appears to
/// be in the future counts as just now.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cooldown_remaining(last_ms: i64, now_ms: i64, delay: Duration) -> Option<f64> {
    let delay_ms = delay_ms(delay);
    let elapsed = now_ms.saturating_sub(last_ms).max(0);
    (elapsed < delay_ms).then(|| (delay_ms - elapsed) as f64 / 1000.0)
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Validate, rate-limit, persist, and broadcast one draw.
///
/// # Errors
///
/// [`PlaceError::Invalid`] for bad coordinates or color (bounds first),
/// [`PlaceError::Cooldown`] inside the cooldown window, or a database error.
pub async fn draw(state: &AppState, username: &str, command: DrawCommand) -> Result<DrawEvent, PlaceError> {
    let index = command.validate()?;
    let x = u32::try_from(command.x).map_err(|_| DrawError::OutOfBounds)?;
    let y = u32::try_from(command.y).map_err(|_| DrawError::OutOfBounds)?;
    let color = command.color_index();

    let drawn_at = OffsetDateTime::now_utc();
    let now_ms = to_ms(drawn_at);

    let mut tx = state.pool.begin().await?;
    let claimed: Option<i64> = sqlx::query_scalar(
        "INSERT INTO last_tile_timestamp (username, drawn_at_ms) VALUES ($1, $2)
         ON CONFLICT (username) DO UPDATE SET drawn_at_ms = EXCLUDED.drawn_at_ms
         WHERE last_tile_timestamp.drawn_at_ms <= $2 - $3
         RETURNING drawn_at_ms",
    )
    .bind(username)
    .bind(now_ms)
    .bind(delay_ms(state.draw_delay))
    .fetch_optional(&mut *tx)
    .await?;

    if claimed.is_none() {
        let last_ms: i64 = sqlx::query_scalar("SELECT drawn_at_ms FROM last_tile_timestamp WHERE username = $1")
            .bind(username)
            .fetch_one(&mut *tx)
            .await?;
        tx.rollback().await?;
        let remaining_secs = cooldown_remaining(last_ms, now_ms, state.draw_delay).unwrap_or(0.0);
        return Err(PlaceError::Cooldown { remaining_secs });
    }

    // Held from tile insert to broadcast: tile ids, the bitmap, and the event
    // stream all see draws to a cell in the same order.
    let mut board = state.board.write().await;
    sqlx::query("INSERT INTO tiles (x, y, color, username, drawn_at_ms) VALUES ($1, $2, $3, $4, $5)")
        .bind(i32::try_from(x).map_err(|_| DrawError::OutOfBounds)?)
        .bind(i32::try_from(y).map_err(|_| DrawError::OutOfBounds)?)
        .bind(i16::from(color))
        .bind(username)
        .bind(now_ms)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    board.set(index, color);

    let event = DrawEvent { x, y, color, user: username.to_owned(), timestamp: format_timestamp(drawn_at) };
    // No subscribers is not an error.
    let subscribers = state.live.send(LiveMessage::Draw(event.clone())).unwrap_or(0);
    drop(board);
    tracing::debug!(%username, x, y, color, subscribers, "draw broadcast");

    Ok(event)
}

/// Current color of one pixel.
///
/// # Errors
///
/// Returns [`PlaceError::PixelOutOfRange`] outside the board.
pub async fn pixel(state: &AppState, x: i64, y: i64) -> Result<u8, PlaceError> {
    let index = u32::try_from(x)
        .ok()
        .zip(u32::try_from(y).ok())
        .and_then(|(x, y)| pixel_index(x, y))
        .ok_or(PlaceError::PixelOutOfRange)?;
    state.board.read().await.get(index).ok_or(PlaceError::PixelOutOfRange)
}

/// The whole board, one color index per pixel.
pub async fn colors(state: &AppState) -> Vec<u8> {
    state.board.read().await.to_colors()
}

/// Time of the user's last accepted draw.
///
/// # Errors
///
/// Returns [`PlaceError::NoTimestamp`] if the user never drew, or a database error.
pub async fn last_draw(pool: &PgPool, username: &str) -> Result<OffsetDateTime, PlaceError> {
    let last_ms: Option<i64> = sqlx::query_scalar("SELECT drawn_at_ms FROM last_tile_timestamp WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    last_ms.and_then(from_ms).ok_or(PlaceError::NoTimestamp)
}

/// Rebuild the board from the newest tile in each cell.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn load_tiles(pool: &PgPool) -> Result<Bitmap, sqlx::Error> {
    let rows: Vec<(i32, i32, i16)> =
        sqlx::query_as("SELECT DISTINCT ON (x, y) x, y, color FROM tiles ORDER BY x, y, id DESC")
            .fetch_all(pool)
            .await?;

    let tiles = rows.into_iter().filter_map(|(x, y, color)| {
        Some((u32::try_from(x).ok()?, u32::try_from(y).ok()?, u8::try_from(color).ok()?))
    });
    Ok(Bitmap::from_tiles(tiles))
}
