//! Bearer token adapters.

mod jwt_codec;

pub use jwt_codec::{DEFAULT_TOKEN_TTL, JwtTokenCodec};
