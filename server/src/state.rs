//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the in-memory board, the live draw channel,
//! and the token authority. Every field is cheap to clone.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::{RwLock, broadcast};
use wire::LiveMessage;

use crate::config::ServerConfig;
use crate::services::auth::TokenAuthority;
use crate::services::bitmap::Bitmap;

/// Buffered draw events per live subscriber before it starts lagging.
const LIVE_CHANNEL_CAPACITY: usize = 1024;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub board: Arc<RwLock<Bitmap>>,
    /// Fan-out of accepted draws to every live socket.
    pub live: broadcast::Sender<LiveMessage>,
    pub tokens: TokenAuthority,
    pub draw_delay: Duration,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, board: Bitmap, config: &ServerConfig) -> Self {
        let (live, _) = broadcast::channel(LIVE_CHANNEL_CAPACITY);
        Self {
            pool,
            board: Arc::new(RwLock::new(board)),
            live,
            tokens: TokenAuthority::from_config(config),
            draw_delay: config.draw_delay,
            cookie_secure: config.cookie_secure,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
