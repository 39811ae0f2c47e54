//! Driving port for appointment use-cases.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    AccessToken, Appointment, AppointmentId, AppointmentStatus, AppointmentView, Error, UserId,
};

/// Validated booking request; the caller becomes the patient.
#[derive(Debug, Clone)]
pub struct BookAppointmentRequest {
    /// The doctor to book with; existence is not verified server-side.
    pub doctor_id: UserId,
    /// Requested calendar date.
    pub date: NaiveDate,
    /// Display time slot.
    pub time: String,
    /// Optional free-text reason.
    pub reason: Option<String>,
}

/// Domain use-case port for appointments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Book a new appointment in the `pending` state.
    async fn create(
        &self,
        token: &AccessToken,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, Error>;

    /// List the caller's appointments, role-dependent, enriched with both
    /// parties' current account snapshots.
    async fn list_for_user(&self, token: &AccessToken) -> Result<Vec<AppointmentView>, Error>;

    /// Transition an appointment's status, enforcing ownership and the
    /// lifecycle state machine.
    async fn update_status(
        &self,
        token: &AccessToken,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, Error>;

    /// Hard-delete an appointment; patient-owned only.
    async fn delete(&self, token: &AccessToken, id: &AppointmentId) -> Result<(), Error>;
}
