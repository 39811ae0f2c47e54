//! Authentication primitives: passwords and bearer access tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Password material is zeroized on drop; tokens are logged only through
//! their truncated SHA-256 fingerprint.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Minimum accepted password length, matching the identity provider's rule.
pub const PASSWORD_MIN: usize = 6;

/// Length of the token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Validation errors raised by credential constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Password was blank.
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Access token was blank or contained whitespace.
    MalformedToken,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::MalformedToken => write!(f, "access token is malformed"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated password retaining caller-provided whitespace.
///
/// ## Invariants
/// - Non-empty and at least [`PASSWORD_MIN`] characters.
/// - Backing storage is wiped when the value is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Borrow the secret for comparison or provider calls.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Opaque bearer token issued by the identity provider.
///
/// The raw value never appears in logs; use [`AccessToken::fingerprint`]
/// for correlation instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validate and construct an [`AccessToken`].
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(CredentialValidationError::MalformedToken);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw token for provider calls.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint of the token for log correlation.
    ///
    /// Returns the first 8 bytes of the hash as a 16-character hex string,
    /// enough for visual distinction without being security-sensitive.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AccessToken;
    ///
    /// let token = AccessToken::new("tk_0123456789abcdef").expect("token shape");
    /// let fp = token.fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
    }
}
