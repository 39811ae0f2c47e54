//! Driven port for the third-party identity provider.
//!
//! Authentication defers entirely to the provider: it owns credentials,
//! assigns user ids, and issues the opaque bearer tokens consumed by every
//! other call. The domain only sees this trait.

use async_trait::async_trait;

use crate::domain::{AccessToken, EmailAddress, Password, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by identity provider adapters.
    pub enum IdentityProviderError {
        /// The email address is already registered.
        DuplicateEmail => "email address is already registered",
        /// Credentials were rejected; deliberately does not say why.
        InvalidCredentials => "invalid credentials",
        /// The access token is unknown, expired, or revoked.
        TokenRejected => "access token was rejected",
        /// The provider did not answer in time.
        Timeout { message: String } => "identity provider timed out: {message}",
        /// The provider failed unexpectedly.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// A new account to register with the provider.
#[derive(Debug, Clone)]
pub struct NewProviderAccount {
    /// Login email; the provider enforces uniqueness.
    pub email: EmailAddress,
    /// Initial password.
    pub password: Password,
    /// Display name forwarded as provider metadata.
    pub name: String,
    /// Account role forwarded as provider metadata.
    pub role: Role,
}

/// An authenticated provider session.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    /// Opaque bearer token for subsequent calls.
    pub access_token: AccessToken,
    /// The authenticated user's provider-assigned id.
    pub user_id: UserId,
}

/// Port over the third-party identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register an account (auto-confirmed) and return its assigned id.
    async fn create_account(
        &self,
        account: &NewProviderAccount,
    ) -> Result<UserId, IdentityProviderError>;

    /// Authenticate credentials and open a session.
    async fn sign_in(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<ProviderSession, IdentityProviderError>;

    /// Resolve a bearer token to the user id it was issued for.
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError>;

    /// Invalidate a session; succeeds when the token is already dead.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityProviderError>;
}
