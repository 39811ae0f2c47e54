//! Doctor profile extension and the merged profile projection.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::UserAccount;

/// Validation errors raised by doctor profile primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum DoctorValidationError {
    /// Rating fell outside the 0.0–5.0 range or was not finite.
    RatingOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// Availability status string did not match a known value.
    UnknownStatus {
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for DoctorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingOutOfRange { value } => {
                write!(f, "rating must be between 0.0 and 5.0, got {value}")
            }
            Self::UnknownStatus { value } => {
                write!(f, "status must be one of available, busy, offline, got {value}")
            }
        }
    }
}

impl std::error::Error for DoctorValidationError {}

/// Self-reported availability shown in the doctor directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    /// Accepting consultations right now.
    Available,
    /// Signed in but occupied.
    Busy,
    /// Not reachable; the default for fresh doctor accounts.
    Offline,
}

impl AvailabilityStatus {
    /// Parse a status string, rejecting anything outside the declared set.
    pub fn parse(raw: &str) -> Result<Self, DoctorValidationError> {
        match raw {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "offline" => Ok(Self::Offline),
            other => Err(DoctorValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Offline => "offline",
        };
        f.write_str(label)
    }
}

/// Patient rating on the 0.0–5.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Default rating granted to newly registered doctors.
    pub const INITIAL: Self = Self(5.0);

    /// Validate and construct a [`Rating`].
    pub fn new(value: f64) -> Result<Self, DoctorValidationError> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(DoctorValidationError::RatingOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// The raw rating value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = DoctorValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Professional profile stored under `doctor:<id>`, 1:1 with a doctor
/// [`UserAccount`]. Identity lives in the record key; the payload carries
/// only the professional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorExtension {
    /// Medical specialization shown in the directory.
    pub specialization: String,
    /// Years of practice.
    pub experience: u32,
    /// Consultation fee in currency minor units.
    pub consultation_fee: u32,
    /// Patient rating; defaults to 5.0 for fresh accounts.
    #[schema(value_type = f64, example = 5.0)]
    pub rating: Rating,
    /// Lifetime patient count; not enforced monotonic.
    pub total_patients: u32,
    /// Current availability, mutable only by the doctor themself.
    pub status: AvailabilityStatus,
    /// Ordered free-text expertise tags.
    pub expertise: Vec<String>,
    /// Free-text biography.
    pub about: String,
}

impl DoctorExtension {
    /// Extension record for a freshly signed-up doctor.
    pub fn new_account() -> Self {
        Self {
            specialization: String::new(),
            experience: 0,
            consultation_fee: 50,
            rating: Rating::INITIAL,
            total_patients: 0,
            status: AvailabilityStatus::Offline,
            expertise: Vec::new(),
            about: String::new(),
        }
    }
}

/// Merged projection of a [`UserAccount`] and its optional
/// [`DoctorExtension`], replacing the original duck-typed object spread.
///
/// Serialized flat so the view is a field superset of both records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Common account fields.
    #[serde(flatten)]
    pub account: UserAccount,
    /// Doctor-only fields, absent for patients.
    #[serde(flatten)]
    pub doctor: Option<DoctorExtension>,
}

impl ProfileView {
    /// Project an account and its optional doctor extension into one view.
    pub fn project(account: UserAccount, doctor: Option<DoctorExtension>) -> Self {
        Self { account, doctor }
    }
}
