//! Backend entry-point: loads configuration, prepares the stores and runs the
//! HTTP server.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use saarthi_backend::inbound::http::health::HealthState;
use saarthi_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
use saarthi_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use saarthi_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let mode = BuildMode::from_debug_assertions();
    let token = token_settings_from_env(&DefaultEnv::new(), mode).map_err(io::Error::other)?;
    info!(
        fingerprint = %token.fingerprint(),
        source = ?token.source(),
        ttl_hours = token.ttl().num_hours(),
        "token secret loaded"
    );

    let mut config = ServerConfig::new(&settings, token);
    match settings.database_url() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .map_err(io::Error::other)?;
            info!(applied, "database migrations applied");
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None if mode == BuildMode::Release => {
            return Err(io::Error::other(
                "SAARTHI_DATABASE_URL is required in release builds",
            ));
        }
        None => warn!("no database configured; using in-memory stores (data is lost on exit)"),
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
