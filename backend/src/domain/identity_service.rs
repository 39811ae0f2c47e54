//! Identity and session service.
//!
//! Credential checks defer entirely to the injected identity provider; this
//! service derives and maintains the stored profile records and the merged
//! profile view. All mutations are direct overwrites: concurrent updates to
//! the same user race under last-write-wins.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, IdentityService, NewProviderAccount, SessionView,
    SignupRequest, UserPatch,
};
use crate::domain::session::{map_provider_error, resolve_caller};
use crate::domain::{
    AccessToken, DoctorExtension, EmailAddress, Error, Password, ProfileView, Role, UserAccount,
    UserId,
};

use super::records::Records;

/// Identity service backed by a provider and the record store.
#[derive(Clone)]
pub struct IdentityServiceImpl<P> {
    provider: Arc<P>,
    records: Records,
    clock: Arc<dyn Clock>,
}

impl<P> IdentityServiceImpl<P> {
    /// Create a new identity service.
    pub fn new(provider: Arc<P>, records: Records, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            records,
            clock,
        }
    }
}

impl<P> IdentityServiceImpl<P>
where
    P: IdentityProvider,
{
    fn derive_account(&self, user_id: UserId, request: &SignupRequest) -> UserAccount {
        UserAccount {
            id: user_id,
            email: request.email.clone(),
            name: request.name.clone(),
            role: request.role,
            phone: request.profile.phone.clone(),
            age: request.profile.age,
            gender: request.profile.gender.clone(),
            address: request.profile.address.clone(),
            points: match request.role {
                Role::Patient => Some(0),
                Role::Doctor => None,
            },
            created_at: self.clock.utc(),
        }
    }

    fn derive_doctor_extension(request: &SignupRequest) -> DoctorExtension {
        let mut extension = DoctorExtension::new_account();
        if let Some(specialization) = &request.profile.specialization {
            extension.specialization = specialization.clone();
        }
        if let Some(experience) = request.profile.experience {
            extension.experience = experience;
        }
        if let Some(fee) = request.profile.consultation_fee {
            extension.consultation_fee = fee;
        }
        if let Some(expertise) = &request.profile.expertise {
            extension.expertise = expertise.clone();
        }
        if let Some(about) = &request.profile.about {
            extension.about = about.clone();
        }
        extension
    }
}

#[async_trait]
impl<P> IdentityService for IdentityServiceImpl<P>
where
    P: IdentityProvider,
{
    async fn signup(&self, request: SignupRequest) -> Result<ProfileView, Error> {
        let provider_account = NewProviderAccount {
            email: request.email.clone(),
            password: request.password.clone(),
            name: request.name.clone(),
            role: request.role,
        };
        let user_id = self
            .provider
            .create_account(&provider_account)
            .await
            .map_err(map_provider_error)?;

        let account = self.derive_account(user_id, &request);
        self.records.put_user(&account).await?;

        let doctor = if request.role == Role::Doctor {
            let extension = Self::derive_doctor_extension(&request);
            self.records.put_doctor(&account.id, &extension).await?;
            Some(extension)
        } else {
            None
        };

        info!(user = %account.id, role = ?account.role, "account created");
        Ok(ProfileView::project(account, doctor))
    }

    async fn signin(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<SessionView, Error> {
        let session = self
            .provider
            .sign_in(email, password)
            .await
            .map_err(map_provider_error)?;
        let account = self
            .records
            .user(&session.user_id)
            .await?
            .ok_or_else(|| Error::internal("profile record missing for authenticated user"))?;
        let user = self.records.profile_view(account).await?;
        info!(user = %session.user_id, token = %session.access_token.fingerprint(), "session opened");
        Ok(SessionView {
            access_token: session.access_token,
            user,
        })
    }

    async fn current_user(&self, token: &AccessToken) -> Result<ProfileView, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        self.records.profile_view(caller).await
    }

    async fn logout<'a>(&self, token: Option<&'a AccessToken>) -> Result<(), Error> {
        let Some(token) = token else {
            return Ok(());
        };
        match self.provider.sign_out(token).await {
            Ok(()) => Ok(()),
            // A dead or unknown token still counts as logged out.
            Err(
                IdentityProviderError::TokenRejected | IdentityProviderError::InvalidCredentials,
            ) => Ok(()),
            Err(error) => Err(map_provider_error(error)),
        }
    }

    async fn update_user(
        &self,
        token: &AccessToken,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<ProfileView, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        if &caller.id != id {
            return Err(Error::forbidden("users may only update their own profile"));
        }

        let mut account = caller;
        patch.apply_to_account(&mut account);
        self.records.put_user(&account).await?;

        let doctor = if account.is_doctor() {
            let mut extension = self.records.require_doctor(&account.id).await?;
            if patch.touches_doctor_fields() {
                patch.apply_to_doctor(&mut extension);
                self.records.put_doctor(&account.id, &extension).await?;
            }
            Some(extension)
        } else {
            None
        };

        Ok(ProfileView::project(account, doctor))
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
