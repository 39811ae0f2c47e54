//! Appointment API handlers.
//!
//! ```text
//! POST   /api/v1/appointments
//! GET    /api/v1/appointments
//! PUT    /api/v1/appointments/{id}
//! DELETE /api/v1/appointments/{id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{AppointmentService, BookAppointmentRequest};
use crate::domain::{AppointmentId, AppointmentStatus, Error, UserId};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn parse_appointment_id(raw: String) -> Result<AppointmentId, Error> {
    AppointmentId::new(raw).map_err(|error| Error::invalid_request(error.to_string()))
}

/// Booking request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookBody {
    /// The doctor to book with.
    pub doctor_id: String,
    /// Requested calendar date, `YYYY-MM-DD`.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Display time slot, e.g. `10:00 AM`.
    pub time: String,
    /// Optional free-text reason.
    pub reason: Option<String>,
}

/// Status transition body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentStatusBody {
    /// Target lifecycle state.
    pub status: AppointmentStatus,
}

/// Book an appointment; the authenticated patient becomes its owner.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = BookBody,
    responses(
        (status = 200, description = "Created appointment, status pending"),
        (status = 400, description = "Malformed booking"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 403, description = "Caller is not a patient")
    ),
    tags = ["appointments"],
    operation_id = "createAppointment"
)]
#[post("/appointments")]
pub async fn create_appointment(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<BookBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let doctor_id =
        UserId::new(body.doctor_id).map_err(|error| Error::invalid_request(error.to_string()))?;
    let appointment = state
        .appointments
        .create(
            auth.token(),
            BookAppointmentRequest {
                doctor_id,
                date: body.date,
                time: body.time,
                reason: body.reason,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "appointment": appointment })))
}

/// List the caller's appointments: a doctor sees bookings assigned to
/// them, a patient sees bookings they made. Each record carries both
/// parties' current account snapshots.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    responses(
        (status = 200, description = "Enriched appointments for the caller"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("/appointments")]
pub async fn list_appointments(
    state: web::Data<HttpState>,
    auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let appointments = state.appointments.list_for_user(auth.token()).await?;
    Ok(HttpResponse::Ok().json(json!({ "appointments": appointments })))
}

/// Transition an appointment's status.
#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    request_body = AppointmentStatusBody,
    responses(
        (status = 200, description = "Updated appointment"),
        (status = 400, description = "Transition violates the lifecycle"),
        (status = 403, description = "Caller is not permitted this transition"),
        (status = 404, description = "No such appointment")
    ),
    tags = ["appointments"],
    operation_id = "updateAppointmentStatus"
)]
#[put("/appointments/{id}")]
pub async fn update_appointment_status(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<AppointmentStatusBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_appointment_id(path.into_inner())?;
    let appointment = state
        .appointments
        .update_status(auth.token(), &id, payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "appointment": appointment })))
}

/// Hard-delete an appointment. Distinct from cancelling: cancellation
/// preserves history, deletion removes the record entirely.
#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    responses(
        (status = 200, description = "Appointment removed"),
        (status = 403, description = "Caller is not the booking patient"),
        (status = 404, description = "No such appointment")
    ),
    tags = ["appointments"],
    operation_id = "deleteAppointment"
)]
#[delete("/appointments/{id}")]
pub async fn delete_appointment(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_appointment_id(path.into_inner())?;
    state.appointments.delete(auth.token(), &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Appointment deleted" })))
}
