//! User account model shared by patients and doctors.
//!
//! Identifiers are provider-assigned opaque strings, not UUIDs: the identity
//! provider owns the id namespace and this service never parses them beyond
//! basic shape checks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised when constructing account primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried surrounding whitespace.
    PaddedId,
    /// The email address was empty once trimmed.
    EmptyEmail,
    /// The email address is not of the `local@domain` shape.
    InvalidEmail,
    /// The display name was empty once trimmed.
    EmptyName,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be of the form local@domain"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Opaque provider-assigned user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AccountValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(AccountValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Borrow the raw identifier string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role attached to an account at signup; never reassigned afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A care-seeking user; may book and cancel appointments.
    Patient,
    /// A care-giving user with a [`super::DoctorExtension`] record.
    Doctor,
}

/// Email address used for provider login lookups.
///
/// ## Invariants
/// - Lowercased on construction so lookups are case-insensitive.
/// - Must contain exactly one `@` with non-empty local and domain parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Borrow the normalized address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user profile record, kept under the `user:<id>` key.
///
/// ## Invariants
/// - `id`, `email`, `role`, and `created_at` are set at signup and never
///   change afterwards.
/// - `points` is present for patients only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Provider-assigned identifier, shared with the doctor record if any.
    #[schema(value_type = String, example = "6f1f9c2e9d0f4b7f")]
    pub id: UserId,
    /// Login email, unique across accounts.
    #[schema(value_type = String, example = "dr.smith@healthcare.com")]
    pub email: EmailAddress,
    /// Display name.
    pub name: String,
    /// Account role, fixed at signup.
    pub role: Role,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Self-reported gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Loyalty points, tracked for patients only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    /// Signup instant; write-once.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// True when the account belongs to a doctor.
    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }
}
