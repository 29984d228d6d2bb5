//! Token signing secret configuration.
//!
//! The HS256 secret is read from the file named by `AUTH_TOKEN_SECRET_FILE`,
//! or taken inline from `AUTH_TOKEN_SECRET`. Debug builds, or release builds
//! with `AUTH_TOKEN_ALLOW_EPHEMERAL=1`, fall back to a random per-process
//! secret, which invalidates every token on restart.

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

const SECRET_FILE_ENV: &str = "AUTH_TOKEN_SECRET_FILE";
const SECRET_ENV: &str = "AUTH_TOKEN_SECRET";
const ALLOW_EPHEMERAL_ENV: &str = "AUTH_TOKEN_ALLOW_EPHEMERAL";
/// Shortest secret accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates missing or short secrets with a warning.
    Debug,
    /// Requires an explicit secret of adequate length.
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the secret came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecretSource {
    /// Read from `AUTH_TOKEN_SECRET_FILE`.
    File,
    /// Taken from `AUTH_TOKEN_SECRET`.
    Inline,
    /// Generated for this process only.
    Ephemeral,
}

/// Resolved signing secret.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
}

impl TokenSecret {
    /// Secret material.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Origin of the secret.
    pub fn source(&self) -> SecretSource {
        self.source
    }

    /// Truncated SHA-256 of the secret, safe to log.
    ///
    /// ```rust
    /// use factory_backend::inbound::http::token_config::{BuildMode, token_secret_from_env};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "AUTH_TOKEN_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
    ///     _ => None,
    /// });
    /// let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
    /// assert_eq!(secret.fingerprint().len(), 16);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes.as_slice());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSecret")
            .field("source", &self.source)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Errors raised while resolving the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither secret variable is set and ephemeral secrets are not allowed.
    #[error("set AUTH_TOKEN_SECRET_FILE or AUTH_TOKEN_SECRET")]
    MissingSecret,
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is shorter than [`TOKEN_SECRET_MIN_LEN`].
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    /// `AUTH_TOKEN_ALLOW_EPHEMERAL` holds an unrecognised value.
    #[error("invalid value for AUTH_TOKEN_ALLOW_EPHEMERAL='{value}'; expected 1|0|true|false")]
    InvalidToggle { value: String },
}

/// Resolve the signing secret from the environment.
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    if let Some(path) = env.string(SECRET_FILE_ENV) {
        let bytes = read_secret_file(PathBuf::from(path))?;
        return checked(bytes, SecretSource::File, mode);
    }
    if let Some(mut inline) = env.string(SECRET_ENV) {
        let bytes = Zeroizing::new(inline.trim().as_bytes().to_vec());
        inline.zeroize();
        if !bytes.is_empty() {
            return checked(bytes, SecretSource::Inline, mode);
        }
    }
    if mode.is_debug() || allow_ephemeral(env)? {
        warn!("using ephemeral token secret (tokens will not survive restart)");
        return Ok(ephemeral());
    }
    Err(TokenConfigError::MissingSecret)
}

fn read_secret_file(path: PathBuf) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let mut raw = std::fs::read(&path)
        .map_err(|source| TokenConfigError::SecretRead { path, source })?;
    let trimmed = Zeroizing::new(raw.trim_ascii().to_vec());
    raw.zeroize();
    Ok(trimmed)
}

fn checked(
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let length = bytes.len();
    if length < TOKEN_SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(TokenConfigError::SecretTooShort {
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(length, "token secret shorter than recommended");
    }
    Ok(TokenSecret { bytes, source })
}

fn allow_ephemeral<E: Env>(env: &E) -> Result<bool, TokenConfigError> {
    match env.string(ALLOW_EPHEMERAL_ENV) {
        None => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(TokenConfigError::InvalidToggle { value }),
        },
    }
}

fn ephemeral() -> TokenSecret {
    let mut bytes = Zeroizing::new(vec![0_u8; TOKEN_SECRET_MIN_LEN]);
    OsRng.fill_bytes(bytes.as_mut_slice());
    TokenSecret {
        bytes,
        source: SecretSource::Ephemeral,
    }
}
