//! Driving port for the doctor directory and availability status.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{AccessToken, AvailabilityStatus, Error, ProfileView, UserId};

/// Field-wise patch over a doctor's professional profile.
///
/// Rating and patient totals are system-maintained and deliberately not
/// patchable here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfilePatch {
    /// New specialization.
    pub specialization: Option<String>,
    /// New years of practice.
    pub experience: Option<u32>,
    /// New consultation fee in minor units.
    pub consultation_fee: Option<u32>,
    /// New expertise tags.
    pub expertise: Option<Vec<String>>,
    /// New biography.
    pub about: Option<String>,
}

impl DoctorProfilePatch {
    /// Apply the present fields onto `extension`.
    pub fn apply_to(&self, extension: &mut crate::domain::DoctorExtension) {
        if let Some(specialization) = &self.specialization {
            extension.specialization = specialization.clone();
        }
        if let Some(experience) = self.experience {
            extension.experience = experience;
        }
        if let Some(fee) = self.consultation_fee {
            extension.consultation_fee = fee;
        }
        if let Some(expertise) = &self.expertise {
            extension.expertise = expertise.clone();
        }
        if let Some(about) = &self.about {
            extension.about = about.clone();
        }
    }
}

/// Domain use-case port for the doctor directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Every doctor profile merged with its account snapshot; unpaginated.
    async fn list_all(&self) -> Result<Vec<ProfileView>, Error>;

    /// One merged doctor profile; `NotFound` when either record is absent.
    async fn get_by_id(&self, id: &UserId) -> Result<ProfileView, Error>;

    /// Patch the caller's own professional profile; owner-only.
    async fn update_profile(
        &self,
        token: &AccessToken,
        id: &UserId,
        patch: DoctorProfilePatch,
    ) -> Result<ProfileView, Error>;

    /// Update the caller's own availability; owner-only.
    async fn update_status(
        &self,
        token: &AccessToken,
        id: &UserId,
        status: AvailabilityStatus,
    ) -> Result<ProfileView, Error>;
}
