//! Port for issuing and verifying bearer tokens.
//!
//! The codec is synchronous: signing and verifying are cheap HMAC operations
//! and never touch I/O.

use chrono::{DateTime, Utc};

use crate::domain::{BearerToken, Identity};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// Signature, structure, or claims did not validate.
        Invalid { message: String } => "token invalid: {message}",
        /// The token was well formed but past its expiry.
        Expired => "token expired",
        /// Signing failed.
        Encode { message: String } => "token encoding failed: {message}",
    }
}

/// Bearer token issuer and verifier.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `identity`, valid from `issued_at`.
    fn issue(&self, identity: &Identity, issued_at: DateTime<Utc>)
    -> Result<BearerToken, TokenError>;

    /// Verify `token` and return the identity it carries.
    fn verify(&self, token: &BearerToken) -> Result<Identity, TokenError>;
}
