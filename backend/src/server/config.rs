//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use shelter_backend::inbound::http::health::StoreKind;
use shelter_backend::inbound::http::token_config::TokenSettings;
use shelter_backend::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) token_key: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by in-memory stores.
    #[must_use]
    pub fn new(tokens: TokenSettings, bind_addr: SocketAddr) -> Self {
        let TokenSettings { key, ttl } = tokens;
        Self {
            token_key: key,
            token_ttl: ttl,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so the PostgreSQL repositories are
    /// used instead of the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Record store the server will run against.
    #[must_use]
    pub fn store_kind(&self) -> StoreKind {
        if self.db_pool.is_some() {
            StoreKind::Postgres
        } else {
            StoreKind::Memory
        }
    }
}
