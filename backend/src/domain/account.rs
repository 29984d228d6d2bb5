//! Account primitives.
//!
//! Accounts are created once and never updated. The stored password is an
//! Argon2 PHC string; plaintext only lives inside [`NewAccount`] long enough to
//! be hashed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors raised while building account input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Account name missing or blank once trimmed.
    #[error("account must not be empty")]
    EmptyAccount,
    /// Password missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Age below zero.
    #[error("age must not be negative")]
    NegativeAge,
    /// Identifier was not a UUID.
    #[error("account id must be a valid UUID")]
    InvalidId,
}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for AccountId {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login name of an account.
///
/// ## Invariants
/// - Trimmed and non-empty.
///
/// # Examples
/// ```
/// use factory_backend::domain::AccountName;
///
/// assert_eq!(AccountName::new("  alice ").unwrap().as_ref(), "alice");
/// assert!(AccountName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Validate and construct an account name.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyAccount);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountName> for String {
    fn from(value: AccountName) -> Self {
        value.0
    }
}

/// Optional contact and demographic details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-form gender label.
    pub gender: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
}

/// Validated request to create an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    account: AccountName,
    password: Zeroizing<String>,
    details: AccountDetails,
}

impl NewAccount {
    /// Validate raw account input.
    ///
    /// # Examples
    /// ```
    /// use factory_backend::domain::{AccountDetails, NewAccount};
    ///
    /// let input = NewAccount::try_from_parts(Some("bob"), Some("pw"), AccountDetails::default());
    /// assert!(input.is_ok());
    /// assert!(NewAccount::try_from_parts(Some("bob"), None, AccountDetails::default()).is_err());
    /// ```
    pub fn try_from_parts(
        account: Option<&str>,
        password: Option<&str>,
        details: AccountDetails,
    ) -> Result<Self, AccountValidationError> {
        let account = AccountName::new(account.unwrap_or_default())?;
        let password = match password {
            Some(value) if !value.is_empty() => Zeroizing::new(value.to_owned()),
            _ => return Err(AccountValidationError::EmptyPassword),
        };
        if details.age.is_some_and(|age| age < 0) {
            return Err(AccountValidationError::NegativeAge);
        }
        Ok(Self {
            account,
            password,
            details,
        })
    }

    /// Requested login name.
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// Plaintext password to be hashed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Optional profile details.
    pub fn details(&self) -> &AccountDetails {
        &self.details
    }
}

/// Stored account, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Identifier embedded in issued tokens.
    pub id: AccountId,
    /// Unique login name.
    pub account: AccountName,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Optional profile details.
    pub details: AccountDetails,
}

impl Account {
    /// Public projection without identifier or password hash.
    pub fn to_profile(&self) -> AccountProfile {
        AccountProfile {
            account: self.account.clone(),
            phone: self.details.phone.clone(),
            gender: self.details.gender.clone(),
            age: self.details.age,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Login name.
    pub account: AccountName,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Gender label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Case-insensitive substring filter over account names.
///
/// A blank needle matches every account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter(Option<String>);

impl AccountFilter {
    /// Build a filter from the optional query parameter.
    pub fn new(needle: Option<&str>) -> Self {
        Self(
            needle
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_lowercase),
        )
    }

    /// Lowercased needle, or `None` to match everything.
    pub fn needle(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether `name` satisfies the filter.
    pub fn matches(&self, name: &AccountName) -> bool {
        self.0
            .as_deref()
            .is_none_or(|needle| name.as_ref().to_lowercase().contains(needle))
    }
}
