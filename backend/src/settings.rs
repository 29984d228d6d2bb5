//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from a CLI flag, a `FACTORY_*` environment variable,
//! or a configuration file; unset values fall back to the defaults below.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::server::LoadTarget;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_TICK_PERIOD_SECS: u64 = 3;
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while turning raw settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid load target URL '{url}': {source}")]
    InvalidTargetUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
}

/// Process-wide server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FACTORY")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3001)]
    pub port: u16,
    /// PostgreSQL URL. In-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Base URL the load generator posts to; defaults to this server.
    pub load_target_url: Option<String>,
    /// Seconds between load generator ticks.
    pub tick_period_secs: Option<u64>,
    /// Per-request timeout for load generator submissions, in seconds.
    pub submit_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Load generator target, period and timeout.
    pub fn load_target(&self) -> Result<LoadTarget, SettingsError> {
        let raw = self
            .load_target_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/", self.port()));
        let base_url = Url::parse(&raw)
            .map_err(|source| SettingsError::InvalidTargetUrl { url: raw, source })?;
        let period = positive_secs(
            "tick_period_secs",
            self.tick_period_secs.unwrap_or(DEFAULT_TICK_PERIOD_SECS),
        )?;
        let timeout = positive_secs(
            "submit_timeout_secs",
            self.submit_timeout_secs
                .unwrap_or(DEFAULT_SUBMIT_TIMEOUT_SECS),
        )?;
        Ok(LoadTarget::new(base_url)
            .with_period(period)
            .with_submit_timeout(timeout))
    }
}

fn positive_secs(name: &'static str, secs: u64) -> Result<Duration, SettingsError> {
    if secs == 0 {
        return Err(SettingsError::ZeroDuration { name });
    }
    Ok(Duration::from_secs(secs))
}
