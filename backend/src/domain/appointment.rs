//! Appointment records and their status lifecycle.
//!
//! The lifecycle is enforced here even though the reference behaviour never
//! gated transitions: `pending → {confirmed, cancelled}`,
//! `confirmed → {completed, cancelled}`, with `completed` and `cancelled`
//! terminal.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{UserAccount, UserId};

/// Key prefix carried inside every appointment identifier.
const ID_PREFIX: &str = "appt_";

/// Validation errors raised by appointment primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    /// Identifier did not start with `appt_` or had an empty suffix.
    MalformedId,
}

impl fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedId => write!(f, "appointment id must be of the form appt_<suffix>"),
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

/// Generated appointment identifier of the form `appt_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Validate and construct an [`AppointmentId`] from an existing string.
    pub fn new(raw: impl Into<String>) -> Result<Self, AppointmentValidationError> {
        let raw = raw.into();
        match raw.strip_prefix(ID_PREFIX) {
            Some(suffix) if !suffix.is_empty() => Ok(Self(raw)),
            _ => Err(AppointmentValidationError::MalformedId),
        }
    }

    /// Generate a fresh unique identifier.
    pub fn generate() -> Self {
        Self(format!("{ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Borrow the raw identifier string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AppointmentId> for String {
    fn from(value: AppointmentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AppointmentId {
    type Error = AppointmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Appointment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Created by the patient, awaiting the doctor's decision.
    Pending,
    /// Accepted by the assigned doctor.
    Confirmed,
    /// Called off by either party; terminal.
    Cancelled,
    /// Carried out; terminal.
    Completed,
}

impl AppointmentStatus {
    /// True when no further transition is allowed from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AppointmentStatus;
    ///
    /// assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Confirmed));
    /// assert!(!AppointmentStatus::Completed.can_transition_to(AppointmentStatus::Pending));
    /// ```
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Booking record stored under `appointment:<id>`.
///
/// ## Invariants
/// - `patient_id` and `doctor_id` are set at creation and never reassigned.
/// - `created_at` is write-once; `updated_at` appears on the first status
///   transition and is bumped on every one after that.
/// - Foreign references are not enforced; consumers tolerate orphans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Generated identifier.
    #[schema(value_type = String, example = "appt_9f8d2c")]
    pub id: AppointmentId,
    /// Booking patient; the only party allowed to delete the record.
    #[schema(value_type = String)]
    pub patient_id: UserId,
    /// Assigned doctor; the only party allowed to confirm or complete.
    #[schema(value_type = String)]
    pub doctor_id: UserId,
    /// Requested calendar date.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Display time slot; not validated against a real schedule.
    pub time: String,
    /// Optional free-text reason for the visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Lifecycle state.
    pub status: AppointmentStatus,
    /// Creation instant; write-once.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Last status transition instant; absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Appointment enriched at read time with both parties' current account
/// snapshots. Missing snapshots stay `None` so orphaned references are
/// tolerated rather than fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    /// The underlying booking record.
    #[serde(flatten)]
    pub appointment: Appointment,
    /// Current snapshot of the assigned doctor's account.
    pub doctor: Option<UserAccount>,
    /// Current snapshot of the booking patient's account.
    pub patient: Option<UserAccount>,
}
