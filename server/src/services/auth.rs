//! Password accounts and JWT access tokens.
//!
//! ARCHITECTURE
//! ============
//! `POST /auth/token` checks a username and password against the argon2 hash
//! in `users`, then issues a signed JWT whose `sub` is the username. Every
//! protected route and the live socket verify that JWT through the shared
//! `TokenAuthority`; no per-request database lookup is involved.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidCredentials(#[from] wire::CredentialError),
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Incorrect username or password")]
    IncorrectLogin,
    #[error("Could not validate credentials")]
    InvalidToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// PASSWORDS
// =============================================================================

/// Hash a password with argon2id and a random salt (PHC string format).
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check a password against a stored PHC hash. Malformed hashes never match.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Create an account.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for a bad username or password,
/// [`AuthError::UsernameTaken`] if the name exists, or a database error.
pub async fn register_user(pool: &PgPool, username: &str, password: &str) -> Result<(), AuthError> {
    wire::validate_username(username)?;
    wire::validate_password(password)?;
    let hash = hash_password(password)?;

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(hash)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AuthError::UsernameTaken);
    }
    tracing::info!(%username, "user registered");
    Ok(())
}

/// Check a username/password pair, returning the canonical username.
///
/// # Errors
///
/// Returns [`AuthError::IncorrectLogin`] for an unknown user or wrong
/// password, or a database error.
pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<String, AuthError> {
    let hash: Option<String> = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match hash {
        Some(hash) if verify_password(password, &hash) => Ok(username.to_owned()),
        _ => Err(AuthError::IncorrectLogin),
    }
}

// =============================================================================
// TOKENS
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Issues and verifies access tokens with one HMAC secret.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: time::Duration,
}

impl TokenAuthority {
    #[must_use]
    pub fn new(secret: &str, algorithm: Algorithm, ttl: time::Duration) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.secret_key, config.algorithm, config.token_ttl)
    }

    #[must_use]
    pub fn ttl(&self) -> time::Duration {
        self.ttl
    }

    /// Sign a token for `username`, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Encode`] if signing fails.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        self.issue_at(username, OffsetDateTime::now_utc())
    }

    pub(crate) fn issue_at(&self, username: &str, issued_at: OffsetDateTime) -> Result<String, AuthError> {
        let claims = Claims { sub: username.to_owned(), exp: (issued_at + self.ttl).unix_timestamp() };
        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?)
    }

    /// Verify a token and return its username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] past `exp`, otherwise
    /// [`AuthError::InvalidToken`] for any signature or format problem.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => return Err(AuthError::TokenExpired),
                _ => return Err(AuthError::InvalidToken),
            },
        };
        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims.sub)
    }
}

/// Pull the token out of an `Authorization` header value. Accepts both
/// `Bearer <jwt>` and a bare `<jwt>`.
#[must_use]
pub fn extract_token(header_value: Option<&str>) -> Option<&str> {
    let raw = header_value?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => raw,
    };
    (!token.is_empty()).then_some(token)
}
