//! Bearer token extractor for authenticated routes.
//!
//! Reads the `Authorization` header (`Bearer <token>` or a bare token) and
//! verifies it through the [`TokenCodec`](crate::domain::ports::TokenCodec)
//! held in [`HttpState`]. A missing or empty header is `401`; a header that
//! carries no usable token, or a token that fails verification, is `403`.

use std::ops::Deref;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{BearerToken, DomainError, Identity};
use crate::inbound::http::state::HttpState;

/// Message for requests without a usable token.
pub const TOKEN_MISSING_MESSAGE: &str = "access token missing";
/// Message for tokens that fail verification.
pub const TOKEN_INVALID_MESSAGE: &str = "token invalid or expired";

/// Identity proven by the request's bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(Identity);

impl Authenticated {
    /// Verified caller.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl Deref for Authenticated {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, DomainError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("HTTP state not configured"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DomainError::unauthorized(TOKEN_MISSING_MESSAGE))?;
    let token = header
        .to_str()
        .ok()
        .and_then(BearerToken::from_header)
        .ok_or_else(|| {
            debug!("authorization header carries no token");
            DomainError::forbidden(TOKEN_INVALID_MESSAGE)
        })?;

    state.tokens.verify(&token).map(Authenticated).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        DomainError::forbidden(TOKEN_INVALID_MESSAGE)
    })
}

impl FromRequest for Authenticated {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
