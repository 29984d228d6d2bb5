//! Authentication primitives: login credentials, bearer tokens, identities.
//!
//! Handlers build these from raw strings before talking to a service so the
//! domain never sees unvalidated input.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{AccountId, AccountName};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Account was missing or blank once trimmed.
    #[error("account must not be empty")]
    EmptyAccount,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `account` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use factory_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" alice "), Some("pw")).unwrap();
/// assert_eq!(creds.account().as_ref(), "alice");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    account: AccountName,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from optional raw inputs.
    pub fn try_from_parts(
        account: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let account = AccountName::new(account.unwrap_or_default())
            .map_err(|_| LoginValidationError::EmptyAccount)?;
        match password {
            Some(value) if !value.is_empty() => Ok(Self {
                account,
                password: Zeroizing::new(value.to_owned()),
            }),
            _ => Err(LoginValidationError::EmptyPassword),
        }
    }

    /// Account name used for the exact lookup.
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer credential handed to clients after login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap an encoded token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Extract the token from an `Authorization` header value.
    ///
    /// Accepts `Bearer <token>` and a bare `<token>`. Returns `None` when the
    /// remaining token is blank.
    ///
    /// # Examples
    /// ```
    /// use factory_backend::domain::BearerToken;
    ///
    /// assert_eq!(BearerToken::from_header("Bearer abc").unwrap().as_str(), "abc");
    /// assert_eq!(BearerToken::from_header("abc").unwrap().as_str(), "abc");
    /// assert!(BearerToken::from_header("Bearer  ").is_none());
    /// ```
    pub fn from_header(raw: &str) -> Option<Self> {
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        (!token.is_empty()).then(|| Self(token.to_owned()))
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// Authenticated caller resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account identifier.
    pub id: AccountId,
    /// Account login name.
    pub account: AccountName,
}
