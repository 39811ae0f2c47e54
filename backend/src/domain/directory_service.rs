//! Doctor directory service: merged listings and self-service profile and
//! availability updates.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use tracing::info;

use crate::domain::ports::{DoctorDirectory, DoctorProfilePatch, IdentityProvider};
use crate::domain::session::resolve_caller;
use crate::domain::{
    AccessToken, AvailabilityStatus, DoctorExtension, Error, ProfileView, Role, UserAccount,
    UserId,
};

use super::records::Records;

/// Doctor directory service backed by the record store.
#[derive(Clone)]
pub struct DoctorDirectoryImpl<P> {
    provider: Arc<P>,
    records: Records,
}

impl<P> DoctorDirectoryImpl<P> {
    /// Create a new directory service.
    pub fn new(provider: Arc<P>, records: Records) -> Self {
        Self { provider, records }
    }
}

impl<P> DoctorDirectoryImpl<P>
where
    P: IdentityProvider,
{
    /// Resolve the caller and check they are the doctor being modified.
    async fn require_owner(
        &self,
        token: &AccessToken,
        id: &UserId,
    ) -> Result<(UserAccount, DoctorExtension), Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        if &caller.id != id {
            return Err(Error::forbidden("doctors may only update their own profile"));
        }
        if caller.role != Role::Doctor {
            return Err(Error::forbidden("only doctors have a directory profile"));
        }
        let extension = self.records.require_doctor(id).await?;
        Ok((caller, extension))
    }
}

#[async_trait]
impl<P> DoctorDirectory for DoctorDirectoryImpl<P>
where
    P: IdentityProvider,
{
    async fn list_all(&self) -> Result<Vec<ProfileView>, Error> {
        let doctors: Vec<UserAccount> = self
            .records
            .users()
            .await?
            .into_iter()
            .filter(UserAccount::is_doctor)
            .collect();

        // Extension lookups are independent; fetch concurrently and skip
        // accounts whose extension record is missing.
        let views = try_join_all(doctors.into_iter().map(|account| async move {
            let extension = self.records.doctor(&account.id).await?;
            Ok::<Option<ProfileView>, Error>(
                extension.map(|extension| ProfileView::project(account, Some(extension))),
            )
        }))
        .await?;
        Ok(views.into_iter().flatten().collect())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<ProfileView, Error> {
        let extension = self.records.require_doctor(id).await?;
        let account = self.records.require_user(id).await?;
        Ok(ProfileView::project(account, Some(extension)))
    }

    async fn update_profile(
        &self,
        token: &AccessToken,
        id: &UserId,
        patch: DoctorProfilePatch,
    ) -> Result<ProfileView, Error> {
        let (account, mut extension) = self.require_owner(token, id).await?;
        patch.apply_to(&mut extension);
        self.records.put_doctor(id, &extension).await?;
        info!(doctor = %id, "doctor profile updated");
        Ok(ProfileView::project(account, Some(extension)))
    }

    async fn update_status(
        &self,
        token: &AccessToken,
        id: &UserId,
        status: AvailabilityStatus,
    ) -> Result<ProfileView, Error> {
        let (account, mut extension) = self.require_owner(token, id).await?;
        extension.status = status;
        self.records.put_doctor(id, &extension).await?;
        info!(doctor = %id, status = %status, "doctor availability updated");
        Ok(ProfileView::project(account, Some(extension)))
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
