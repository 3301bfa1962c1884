//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SAARTHI_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Token settings are handled
//! separately by [`crate::inbound::http::token_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SAARTHI")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL URL. Without one the server runs on in-memory stores
    /// (debug builds only).
    pub database_url: Option<String>,
    /// Directory receiving uploaded project photos.
    pub upload_dir: Option<PathBuf>,
    /// Cap on the size of a multipart request body.
    #[ortho_config(default = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
    /// Origins allowed by CORS, comma-separated in the environment. Empty
    /// allows none.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn upload_dir(&self) -> &Path {
        self.upload_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_UPLOAD_DIR))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
