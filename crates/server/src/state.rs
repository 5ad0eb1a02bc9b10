//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;

/// Shared application state, cheap to clone across handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    config: ServerConfig,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool, config }),
        }
    }

    /// Get the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }
}
