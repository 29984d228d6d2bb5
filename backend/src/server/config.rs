//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::DEFAULT_TICK_PERIOD;
use crate::domain::ports::TokenCodec;
use crate::outbound::persistence::DbPool;
use crate::outbound::stat_http::DEFAULT_SUBMIT_TIMEOUT;

/// Where and how often the load generator posts synthetic telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTarget {
    pub(crate) base_url: Url,
    pub(crate) period: Duration,
    pub(crate) submit_timeout: Duration,
}

impl LoadTarget {
    /// Target `base_url` with the default period and timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            period: DEFAULT_TICK_PERIOD,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Override the interval between ticks.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<dyn TokenCodec>,
    pub(crate) load: LoadTarget,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory stores.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: Arc<dyn TokenCodec>, load: LoadTarget) -> Self {
        Self {
            bind_addr,
            tokens,
            load,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; every repository then uses
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn load_target_defaults() {
        let target = LoadTarget::new(Url::parse("http://localhost:3001/").expect("url"));
        assert_eq!(target.period, Duration::from_secs(3));
        assert_eq!(target.submit_timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn load_target_overrides() {
        let target = LoadTarget::new(Url::parse("http://localhost:3001/").expect("url"))
            .with_period(Duration::from_millis(500))
            .with_submit_timeout(Duration::from_secs(2));
        assert_eq!(target.period, Duration::from_millis(500));
        assert_eq!(target.submit_timeout, Duration::from_secs(2));
    }
}
