//! Identity provider adapters.
//!
//! [`MemoryIdentityProvider`] keeps credentials and sessions in-process for
//! tests and single-node deployments; [`gotrue::GoTrueIdentityProvider`]
//! talks to a hosted GoTrue-style auth API over HTTP.

pub mod gotrue;

use std::collections::HashMap;

use async_trait::async_trait;
use rand::RngCore;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, NewProviderAccount, ProviderSession,
};
use crate::domain::{AccessToken, EmailAddress, Password, UserId};

struct StoredAccount {
    user_id: UserId,
    password: Zeroizing<String>,
}

#[derive(Default)]
struct ProviderState {
    accounts: HashMap<String, StoredAccount>,
    sessions: HashMap<String, UserId>,
}

/// Process-local [`IdentityProvider`] with provider-assigned ids and random
/// bearer tokens.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    state: RwLock<ProviderState>,
}

impl MemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_token() -> Result<AccessToken, IdentityProviderError> {
        let mut bytes = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        AccessToken::new(format!("tk_{}", hex::encode(bytes))).map_err(|error| {
            IdentityProviderError::unavailable(format!("token generation failed: {error}"))
        })
    }

    fn assign_user_id() -> Result<UserId, IdentityProviderError> {
        UserId::new(Uuid::new_v4().simple().to_string()).map_err(|error| {
            IdentityProviderError::unavailable(format!("id generation failed: {error}"))
        })
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_account(
        &self,
        account: &NewProviderAccount,
    ) -> Result<UserId, IdentityProviderError> {
        let mut state = self.state.write().await;
        if state.accounts.contains_key(account.email.as_str()) {
            return Err(IdentityProviderError::duplicate_email());
        }
        let user_id = Self::assign_user_id()?;
        state.accounts.insert(
            account.email.as_str().to_owned(),
            StoredAccount {
                user_id: user_id.clone(),
                password: Zeroizing::new(account.password.expose().to_owned()),
            },
        );
        debug!(user = %user_id, "provider account created");
        Ok(user_id)
    }

    async fn sign_in(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<ProviderSession, IdentityProviderError> {
        let mut state = self.state.write().await;
        let user_id = match state.accounts.get(email.as_str()) {
            Some(stored) if stored.password.as_str() == password.expose() => {
                stored.user_id.clone()
            }
            // Same rejection whether the email exists or not.
            _ => return Err(IdentityProviderError::invalid_credentials()),
        };
        let access_token = Self::issue_token()?;
        state
            .sessions
            .insert(access_token.expose().to_owned(), user_id.clone());
        debug!(user = %user_id, token = %access_token.fingerprint(), "session issued");
        Ok(ProviderSession {
            access_token,
            user_id,
        })
    }

    async fn resolve(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        let state = self.state.read().await;
        state
            .sessions
            .get(token.expose())
            .cloned()
            .ok_or_else(IdentityProviderError::token_rejected)
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityProviderError> {
        let mut state = self.state.write().await;
        if state.sessions.remove(token.expose()).is_some() {
            debug!(token = %token.fingerprint(), "session revoked");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;

    fn account(email: &str) -> NewProviderAccount {
        NewProviderAccount {
            email: EmailAddress::new(email).expect("email"),
            password: Password::new("secret-pass").expect("password"),
            name: "Pat".to_owned(),
            role: Role::Patient,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let provider = MemoryIdentityProvider::new();
        provider
            .create_account(&account("p@example.com"))
            .await
            .expect("first signup");
        let err = provider
            .create_account(&account("p@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, IdentityProviderError::DuplicateEmail);
    }

    #[tokio::test]
    async fn sign_in_rejects_unknown_email_and_wrong_password_alike() {
        let provider = MemoryIdentityProvider::new();
        provider
            .create_account(&account("p@example.com"))
            .await
            .expect("signup");

        let email = EmailAddress::new("p@example.com").expect("email");
        let wrong = Password::new("wrong-pass").expect("password");
        let wrong_password = provider.sign_in(&email, &wrong).await.expect_err("wrong");

        let unknown = EmailAddress::new("ghost@example.com").expect("email");
        let secret = Password::new("secret-pass").expect("password");
        let unknown_email = provider.sign_in(&unknown, &secret).await.expect_err("ghost");

        assert_eq!(wrong_password, unknown_email);
    }

    #[tokio::test]
    async fn tokens_resolve_until_signed_out() {
        let provider = MemoryIdentityProvider::new();
        let user_id = provider
            .create_account(&account("p@example.com"))
            .await
            .expect("signup");
        let email = EmailAddress::new("p@example.com").expect("email");
        let password = Password::new("secret-pass").expect("password");
        let session = provider.sign_in(&email, &password).await.expect("signin");

        let resolved = provider.resolve(&session.access_token).await.expect("resolve");
        assert_eq!(resolved, user_id);

        provider.sign_out(&session.access_token).await.expect("signout");
        let err = provider
            .resolve(&session.access_token)
            .await
            .expect_err("dead token");
        assert_eq!(err, IdentityProviderError::TokenRejected);
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let provider = MemoryIdentityProvider::new();
        let token = AccessToken::new("tk_never_issued").expect("token shape");
        provider.sign_out(&token).await.expect("first signout");
        provider.sign_out(&token).await.expect("second signout");
    }
}
