//! Server configuration loaded from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` reads this once at startup, after `dotenvy` has merged any `.env`
//! file into the process environment. Everything downstream takes values from
//! `ServerConfig` rather than touching the environment again.
//!
//! ERROR HANDLING
//! ==============
//! Required variables that are missing, and any variable that fails to parse,
//! surface as `ConfigError` so startup fails with a precise message.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use jsonwebtoken::Algorithm;

const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS256;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// HMAC secret for access tokens.
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub token_ttl: time::Duration,
    /// Per-user cooldown between accepted draws.
    pub draw_delay: std::time::Duration,
    pub port: u16,
    pub db_max_connections: u32,
    /// `Secure` flag on the `token` cookie.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first bad or missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first bad or missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database_url = required("DATABASE_URL")?;
        let secret_key = required("SECRET_KEY")?;
        let algorithm = match lookup("ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => DEFAULT_ALGORITHM,
        };
        let ttl_minutes: i64 = env_parse(&lookup, "TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid { key: "TOKEN_TTL_MINUTES", value: ttl_minutes.to_string() });
        }
        let delay_secs: u64 = env_parse(&lookup, "DRAW_DELAY_SECS", wire::DEFAULT_DRAW_DELAY_SECS)?;
        let port = env_parse(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections = env_parse(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        Ok(Self {
            database_url,
            secret_key,
            algorithm,
            token_ttl: time::Duration::minutes(ttl_minutes),
            draw_delay: std::time::Duration::from_secs(delay_secs),
            port,
            db_max_connections,
            cookie_secure,
        })
    }
}

/// Parse `1/true/yes/on` and `0/false/no/off`, case-insensitively.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Only the HMAC family works with a shared `SECRET_KEY`.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(ConfigError::Invalid { key: "ALGORITHM", value: raw.to_owned() }),
    }
}

fn env_parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
