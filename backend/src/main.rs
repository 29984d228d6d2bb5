//! Backend entry-point: loads settings, prepares storage and the signing
//! secret, then serves the REST API.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use factory_backend::inbound::http::health::HealthState;
use factory_backend::inbound::http::token_config::{BuildMode, token_secret_from_env};
use factory_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use factory_backend::outbound::token::JwtTokenCodec;
use factory_backend::server::{ServerConfig, create_server};
use factory_backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %secret.fingerprint(),
        source = ?secret.source(),
        "token secret loaded"
    );
    let tokens = Arc::new(JwtTokenCodec::new(secret.as_bytes()));
    drop(secret);

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let load_target = settings.load_target().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr, tokens, load_target);

    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; records are kept in memory");
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
