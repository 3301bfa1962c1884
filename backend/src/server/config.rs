//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use saarthi_backend::inbound::http::token_config::TokenSettings;
use saarthi_backend::outbound::persistence::DbPool;
use saarthi_backend::settings::AppSettings;

/// Everything `create_server` needs, resolved at startup.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_dir: PathBuf,
    pub(crate) max_upload_bytes: usize,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) token: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    pub fn new(settings: &AppSettings, token: TokenSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            upload_dir: settings.upload_dir().to_path_buf(),
            max_upload_bytes: settings.max_upload_bytes(),
            cors_origins: settings.cors_origins(),
            token,
            db_pool: None,
        }
    }

    /// Use PostgreSQL-backed stores instead of the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
