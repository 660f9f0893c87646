//! Auth routes: password grant, registration, and the bearer extractor.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, FromRef, FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use wire::{Credentials, MessageResponse, TOKEN_COOKIE, TokenResponse};

use super::{ApiError, ApiResult};
use crate::services::auth::{self as auth_svc, AuthError};
use crate::state::AppState;

pub(crate) fn auth_error_to_api(err: AuthError) -> ApiError {
    let status = match &err {
        AuthError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
        AuthError::UsernameTaken => StatusCode::CONFLICT,
        AuthError::IncorrectLogin | AuthError::InvalidToken | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
        AuthError::Hash(_) | AuthError::Encode(_) | AuthError::Database(_) => {
            tracing::error!(error = %err, "auth service failure");
            return ApiError::internal();
        }
    };
    ApiError::new(status, err.to_string())
}

/// The `token` cookie. Readable by page scripts so the client can attach the
/// bearer header; the browser also sends it on the live socket upgrade.
pub(crate) fn token_cookie(value: String, ttl: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(ttl)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user from the `Authorization` header.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts.headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
        let token = auth_svc::extract_token(header_value).ok_or_else(ApiError::unauthorized)?;

        let app_state = AppState::from_ref(state);
        let username = app_state.tokens.verify(token).map_err(auth_error_to_api)?;
        Ok(Self { username })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// `POST /auth/token`: OAuth2 password grant. Also sets the `token` cookie.
pub async fn token(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let Form(form) = form?;
    if form.grant_type.as_deref().is_some_and(|g| !g.is_empty() && g != "password") {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Unsupported grant type"));
    }

    let username = auth_svc::authenticate(&state.pool, &form.username, &form.password)
        .await
        .map_err(auth_error_to_api)?;
    let access_token = state.tokens.issue(&username).map_err(auth_error_to_api)?;
    tracing::info!(%username, "access token issued");

    let cookie = token_cookie(access_token.clone(), state.tokens.ttl(), state.cookie_secure);
    Ok((jar.add(cookie), Json(TokenResponse { access_token, token_type: "bearer".to_owned() })))
}

/// `POST /auth/register`: create an account.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(body) = body?;
    auth_svc::register_user(&state.pool, &body.username, &body.password)
        .await
        .map_err(auth_error_to_api)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("User created successfully"))))
}

/// `GET /place/username`: greet the token's user.
pub async fn username(auth: AuthUser) -> ApiResult<MessageResponse> {
    Ok(Json(MessageResponse::new(format!("Hello {}", auth.username))))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
