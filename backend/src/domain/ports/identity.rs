//! Driving port for identity and session use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! sign users up, open sessions, and patch profiles without knowing the
//! backing provider or store. HTTP handler tests substitute a mock.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    AccessToken, EmailAddress, Error, Password, ProfileView, Role, UserAccount, UserId,
};

/// Optional profile fields accepted at signup alongside the required four.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupProfile {
    /// Contact phone number.
    pub phone: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Doctor only: medical specialization.
    pub specialization: Option<String>,
    /// Doctor only: years of practice.
    pub experience: Option<u32>,
    /// Doctor only: consultation fee in minor units.
    pub consultation_fee: Option<u32>,
    /// Doctor only: expertise tags.
    pub expertise: Option<Vec<String>>,
    /// Doctor only: biography.
    pub about: Option<String>,
}

/// Validated signup request.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Login email.
    pub email: EmailAddress,
    /// Initial password.
    pub password: Password,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Optional profile fields.
    pub profile: SignupProfile,
}

/// Opened session: the bearer token plus the merged profile view.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Opaque bearer token to present on subsequent calls.
    pub access_token: AccessToken,
    /// Merged account (+ doctor) view of the authenticated user.
    pub user: ProfileView,
}

/// Field-wise patch applied by [`IdentityService::update_user`].
///
/// Identity fields (`id`, `email`, `role`, `created_at`) are deliberately
/// absent: they are write-once. Doctor-only fields are ignored for
/// patients, and `points` is ignored for doctors.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New gender.
    pub gender: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// Patient only: new points balance.
    pub points: Option<u32>,
    /// Doctor only: new specialization.
    pub specialization: Option<String>,
    /// Doctor only: new years of practice.
    pub experience: Option<u32>,
    /// Doctor only: new consultation fee.
    pub consultation_fee: Option<u32>,
    /// Doctor only: new expertise tags.
    pub expertise: Option<Vec<String>>,
    /// Doctor only: new biography.
    pub about: Option<String>,
}

impl UserPatch {
    /// Apply the account-level fields onto `account`.
    pub fn apply_to_account(&self, account: &mut UserAccount) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            account.phone = Some(phone.clone());
        }
        if let Some(age) = self.age {
            account.age = Some(age);
        }
        if let Some(gender) = &self.gender {
            account.gender = Some(gender.clone());
        }
        if let Some(address) = &self.address {
            account.address = Some(address.clone());
        }
        if let Some(points) = self.points {
            if account.role == Role::Patient {
                account.points = Some(points);
            }
        }
    }

    /// True when any doctor-only field is present.
    pub fn touches_doctor_fields(&self) -> bool {
        self.specialization.is_some()
            || self.experience.is_some()
            || self.consultation_fee.is_some()
            || self.expertise.is_some()
            || self.about.is_some()
    }

    /// Apply the doctor-only fields onto `extension`.
    pub fn apply_to_doctor(&self, extension: &mut crate::domain::DoctorExtension) {
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

/// Domain use-case port for identity and sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a new account and derive its stored profile records.
    async fn signup(&self, request: SignupRequest) -> Result<ProfileView, Error>;

    /// Authenticate credentials and open a session.
    async fn signin(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<SessionView, Error>;

    /// Resolve the bearer token to the caller's merged profile view.
    async fn current_user(&self, token: &AccessToken) -> Result<ProfileView, Error>;

    /// Invalidate the session server-side; idempotent.
    async fn logout<'a>(&self, token: Option<&'a AccessToken>) -> Result<(), Error>;

    /// Patch the caller's own profile; `Forbidden` for any other target.
    async fn update_user(
        &self,
        token: &AccessToken,
        id: &UserId,
        patch: UserPatch,
    ) -> Result<ProfileView, Error>;
}
