//! Appointment service: booking, role-dependent listing, and the enforced
//! status lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::{try_join, try_join_all};
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{AppointmentService, BookAppointmentRequest, IdentityProvider};
use crate::domain::session::resolve_caller;
use crate::domain::{
    AccessToken, Appointment, AppointmentId, AppointmentStatus, AppointmentView, Error, Role,
    UserAccount,
};

use super::records::Records;

/// Appointment service backed by the record store.
#[derive(Clone)]
pub struct AppointmentServiceImpl<P> {
    provider: Arc<P>,
    records: Records,
    clock: Arc<dyn Clock>,
}

impl<P> AppointmentServiceImpl<P> {
    /// Create a new appointment service.
    pub fn new(provider: Arc<P>, records: Records, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            records,
            clock,
        }
    }
}

/// Ownership and role rules for a status change.
///
/// Patients may only cancel their own appointments; doctors may confirm,
/// cancel, or complete appointments bound to their own id. Everything else
/// is forbidden, closing the authorization gap in the reference behaviour.
fn authorize_transition(
    caller: &UserAccount,
    appointment: &Appointment,
    next: AppointmentStatus,
) -> Result<(), Error> {
    match caller.role {
        Role::Patient => {
            if appointment.patient_id != caller.id {
                return Err(Error::forbidden("appointment belongs to another patient"));
            }
            if next != AppointmentStatus::Cancelled {
                return Err(Error::forbidden("patients may only cancel appointments"));
            }
        }
        Role::Doctor => {
            if appointment.doctor_id != caller.id {
                return Err(Error::forbidden("appointment is assigned to another doctor"));
            }
            if next == AppointmentStatus::Pending {
                return Err(Error::forbidden("doctors may not reset appointments to pending"));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl<P> AppointmentService for AppointmentServiceImpl<P>
where
    P: IdentityProvider,
{
    async fn create(
        &self,
        token: &AccessToken,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        if caller.role != Role::Patient {
            return Err(Error::forbidden("only patients may book appointments"));
        }
        if request.time.trim().is_empty() {
            return Err(Error::invalid_request("time must not be empty"));
        }

        let appointment = Appointment {
            id: AppointmentId::generate(),
            patient_id: caller.id,
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            reason: request.reason,
            status: AppointmentStatus::Pending,
            created_at: self.clock.utc(),
            updated_at: None,
        };
        self.records.put_appointment(&appointment).await?;
        info!(appointment = %appointment.id, patient = %appointment.patient_id, "appointment booked");
        Ok(appointment)
    }

    async fn list_for_user(&self, token: &AccessToken) -> Result<Vec<AppointmentView>, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let mut mine: Vec<Appointment> = self
            .records
            .appointments()
            .await?
            .into_iter()
            .filter(|appointment| match caller.role {
                Role::Doctor => appointment.doctor_id == caller.id,
                Role::Patient => appointment.patient_id == caller.id,
            })
            .collect();
        mine.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        // Both snapshots are independent lookups by distinct keys, so they
        // are fetched concurrently and joined.
        try_join_all(mine.into_iter().map(|appointment| async move {
            let (doctor, patient) = try_join(
                self.records.user(&appointment.doctor_id),
                self.records.user(&appointment.patient_id),
            )
            .await?;
            Ok::<AppointmentView, Error>(AppointmentView {
                appointment,
                doctor,
                patient,
            })
        }))
        .await
    }

    async fn update_status(
        &self,
        token: &AccessToken,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let mut appointment = self.records.require_appointment(id).await?;

        authorize_transition(&caller, &appointment, status)?;
        if !appointment.status.can_transition_to(status) {
            return Err(Error::invalid_transition(format!(
                "cannot move appointment from {} to {}",
                appointment.status, status
            )));
        }

        appointment.status = status;
        appointment.updated_at = Some(self.clock.utc());
        self.records.put_appointment(&appointment).await?;
        info!(appointment = %appointment.id, status = %status, "appointment status changed");
        Ok(appointment)
    }

    async fn delete(&self, token: &AccessToken, id: &AppointmentId) -> Result<(), Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let appointment = self.records.require_appointment(id).await?;
        if appointment.patient_id != caller.id {
            return Err(Error::forbidden("only the booking patient may delete an appointment"));
        }
        self.records.remove_appointment(id).await?;
        info!(appointment = %id, "appointment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "appointment_service_tests.rs"]
mod tests;
