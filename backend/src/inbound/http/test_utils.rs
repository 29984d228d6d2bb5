//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{LoadControl, LoadSnapshot, LoadStatus, LoginService, TokenCodec};
use crate::inbound::http::state::{HttpState, StatsPorts};
use crate::outbound::token::JwtTokenCodec;
use crate::server::{SharedPorts, in_memory_http_state};

/// Signing secret used by handler tests.
pub const TEST_TOKEN_SECRET: &[u8] = b"handler-tests-secret-0123456789abcdef";

/// Load control that never runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleLoad;

impl LoadControl for IdleLoad {
    fn toggle(&self) -> LoadStatus {
        LoadStatus::Stopped
    }

    fn snapshot(&self) -> LoadSnapshot {
        LoadSnapshot {
            running: false,
            count: 0,
        }
    }
}

/// Builds [`HttpState`] over in-memory stores, with individual ports
/// replaceable by doubles.
pub struct HttpStateBuilder {
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    load: Arc<dyn LoadControl>,
    stats: Option<StatsPorts>,
    login: Option<Arc<dyn LoginService>>,
}

impl Default for HttpStateBuilder {
    fn default() -> Self {
        Self {
            tokens: Arc::new(JwtTokenCodec::new(TEST_TOKEN_SECRET)),
            clock: Arc::new(DefaultClock),
            load: Arc::new(IdleLoad),
            stats: None,
            login: None,
        }
    }
}

impl HttpStateBuilder {
    pub fn with_tokens(mut self, tokens: impl TokenCodec + 'static) -> Self {
        self.tokens = Arc::new(tokens);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_load(mut self, load: impl LoadControl + 'static) -> Self {
        self.load = Arc::new(load);
        self
    }

    pub fn with_stats(mut self, stats: StatsPorts) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_login(mut self, login: impl LoginService + 'static) -> Self {
        self.login = Some(Arc::new(login));
        self
    }

    pub fn build(self) -> HttpState {
        let mut state = in_memory_http_state(SharedPorts {
            tokens: self.tokens,
            clock: self.clock,
            load: self.load,
        });
        if let Some(stats) = self.stats {
            state.stats = stats;
        }
        if let Some(login) = self.login {
            state.login = login;
        }
        state
    }
}
