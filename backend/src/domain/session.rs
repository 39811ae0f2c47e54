//! Shared session resolution used by every authenticated service call.
//!
//! Services validate bearer tokens against the identity provider and then
//! load the caller's stored profile; the two-step flow lives here so each
//! service does not re-implement it.

use tracing::debug;

use super::account::UserAccount;
use super::credentials::AccessToken;
use super::error::Error;
use super::ports::{IdentityProvider, IdentityProviderError};
use super::records::Records;

/// Re-map provider failures onto the domain taxonomy.
pub(crate) fn map_provider_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::DuplicateEmail => {
            Error::invalid_request("email address is already registered")
        }
        IdentityProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        IdentityProviderError::TokenRejected => {
            Error::unauthorized("invalid or expired access token")
        }
        IdentityProviderError::Timeout { message } => {
            Error::timeout(format!("identity provider timed out: {message}"))
        }
        IdentityProviderError::Unavailable { message } => {
            Error::internal(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Resolve a bearer token to the caller's stored account.
///
/// A token the provider accepts but whose profile record has vanished is
/// treated as unauthorized rather than a 404: the caller cannot act without
/// a profile.
pub(crate) async fn resolve_caller<P>(
    provider: &P,
    records: &Records,
    token: &AccessToken,
) -> Result<UserAccount, Error>
where
    P: IdentityProvider + ?Sized,
{
    let user_id = provider
        .resolve(token)
        .await
        .map_err(map_provider_error)?;
    debug!(token = %token.fingerprint(), user = %user_id, "resolved bearer token");
    match records.user(&user_id).await? {
        Some(account) => Ok(account),
        None => Err(Error::unauthorized("no profile for authenticated user")),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(IdentityProviderError::duplicate_email(), ErrorCode::InvalidRequest)]
    #[case(IdentityProviderError::invalid_credentials(), ErrorCode::Unauthorized)]
    #[case(IdentityProviderError::token_rejected(), ErrorCode::Unauthorized)]
    #[case(IdentityProviderError::timeout("slow"), ErrorCode::Timeout)]
    #[case(IdentityProviderError::unavailable("down"), ErrorCode::InternalError)]
    fn provider_errors_map_onto_the_taxonomy(
        #[case] error: IdentityProviderError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_provider_error(error).code(), expected);
    }
}
