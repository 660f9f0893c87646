//! Shared board model and JSON wire types for the place client and server.
//!
//! This crate owns everything both sides must agree on: board dimensions,
//! the REST request/response bodies, the live draw event pushed over the
//! WebSocket, and the validation rules for draws and credentials. Keeping
//! them here lets the register form reject exactly what the server rejects.


use serde::{Deserialize, Serialize};

// =============================================================================
// BOARD
// =============================================================================

/// Width and height of the square board, in pixels.
pub const BOARD_SIZE: u32 = 100;

/// Number of palette entries; colors are indices in `0..MAX_COLORS`.
pub const MAX_COLORS: u8 = 16;

/// Total pixel count of the board.
pub const PIXEL_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Default per-user delay between two accepted draws, in seconds.
pub const DEFAULT_DRAW_DELAY_SECS: u64 = 2;

/// Cookie carrying the access token; the live socket authenticates from it.
pub const TOKEN_COOKIE: &str = "token";

/// Row-major pixel index for an in-bounds coordinate.
#[must_use]
pub fn pixel_index(x: u32, y: u32) -> Option<usize> {
    if x < BOARD_SIZE && y < BOARD_SIZE {
        Some((x + y * BOARD_SIZE) as usize)
    } else {
        None
    }
}

/// Error returned by [`DrawCommand::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Invalid color value")]
    InvalidColor,
}

/// Body of `POST /api/place/draw`.
///
/// Fields are wide signed integers so that any JSON integer deserializes
/// and out-of-range values are rejected by validation rather than by the
/// JSON layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub x: i64,
    pub y: i64,
    pub color: i64,
}

impl DrawCommand {
    /// Check bounds and color range, returning the pixel index on success.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::OutOfBounds`] before [`DrawError::InvalidColor`]
    /// when both are wrong.
    pub fn validate(&self) -> Result<usize, DrawError> {
        let (Ok(x), Ok(y)) = (u32::try_from(self.x), u32::try_from(self.y)) else {
            return Err(DrawError::OutOfBounds);
        };
        let index = pixel_index(x, y).ok_or(DrawError::OutOfBounds)?;
        if !(0..i64::from(MAX_COLORS)).contains(&self.color) {
            return Err(DrawError::InvalidColor);
        }
        Ok(index)
    }

    /// Color as a palette index. Only meaningful after [`Self::validate`].
    #[must_use]
    pub fn color_index(&self) -> u8 {
        u8::try_from(self.color).unwrap_or(0)
    }
}

// =============================================================================
// LIVE EVENTS
// =============================================================================

/// A single accepted draw, as broadcast to every live socket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub x: u32,
    pub y: u32,
    pub color: u8,
    /// Username of the author.
    pub user: String,
    /// RFC 3339 UTC timestamp of the draw.
    pub timestamp: String,
}

/// Messages pushed by the server on `/api/place/board-bitmap/ws`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveMessage {
    Draw(DrawEvent),
}

impl LiveMessage {
    /// Encode as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an unknown `type` tag.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// =============================================================================
// REST BODIES
// =============================================================================

/// `GET /api/place/delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayResponse {
    pub delay: u64,
}

/// `GET /api/place/board-bitmap/pixel/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelResponse {
    pub pixel_color: Option<u8>,
}

/// `GET /api/place/last-user-timestamp/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampResponse {
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

/// Generic `{ "message": ... }` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body: `{ "detail": ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// `POST /auth/token` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Form body of `POST /auth/token` and JSON body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// =============================================================================
// CREDENTIALS
// =============================================================================

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Error returned by credential validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Username must be 3 to 32 characters.")]
    UsernameLength,
    #[error("Username may only contain letters, digits, '_' and '-'.")]
    UsernameCharset,
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
}

/// Validate a username for registration.
///
/// # Errors
///
/// Returns the first rule the username breaks.
pub fn validate_username(username: &str) -> Result<(), CredentialError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(CredentialError::UsernameLength);
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(CredentialError::UsernameCharset);
    }
    Ok(())
}

/// Validate a password for registration.
///
/// # Errors
///
/// Returns [`CredentialError::PasswordTooShort`] below the minimum length.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}
