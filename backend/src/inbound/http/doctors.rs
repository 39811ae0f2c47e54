//! Doctor directory API handlers.
//!
//! ```text
//! GET /api/v1/doctors
//! GET /api/v1/doctors/{id}
//! PUT /api/v1/doctors/{id}
//! PUT /api/v1/doctors/{id}/status
//! ```

use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{DoctorDirectory, DoctorProfilePatch};
use crate::domain::{AvailabilityStatus, Error, UserId};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|error| Error::invalid_request(error.to_string()))
}

/// Availability update body; the status string must be one of the declared
/// values.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusBody {
    /// `available`, `busy`, or `offline`.
    pub status: String,
}

/// List every doctor, merged with account fields. Search and filtering
/// happen client-side.
#[utoipa::path(
    get,
    path = "/api/v1/doctors",
    responses((status = 200, description = "All doctors, unpaginated")),
    tags = ["doctors"],
    operation_id = "listDoctors",
    security([])
)]
#[get("/doctors")]
pub async fn list_doctors(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let doctors = state.directory.list_all().await?;
    Ok(HttpResponse::Ok().json(json!({ "doctors": doctors })))
}

/// Fetch one merged doctor profile.
#[utoipa::path(
    get,
    path = "/api/v1/doctors/{id}",
    responses(
        (status = 200, description = "Merged doctor profile"),
        (status = 404, description = "No such doctor")
    ),
    tags = ["doctors"],
    operation_id = "getDoctor",
    security([])
)]
#[get("/doctors/{id}")]
pub async fn get_doctor(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    let doctor = state.directory.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "doctor": doctor })))
}

/// Patch the caller's own professional profile.
#[utoipa::path(
    put,
    path = "/api/v1/doctors/{id}",
    responses(
        (status = 200, description = "Merged profile after the patch"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 403, description = "Target is another doctor"),
        (status = 404, description = "No doctor record for the caller")
    ),
    tags = ["doctors"],
    operation_id = "updateDoctor"
)]
#[put("/doctors/{id}")]
pub async fn update_doctor(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<DoctorProfilePatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    let doctor = state
        .directory
        .update_profile(auth.token(), &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "doctor": doctor })))
}

/// Update the caller's own availability status.
#[utoipa::path(
    put,
    path = "/api/v1/doctors/{id}/status",
    request_body = StatusBody,
    responses(
        (status = 200, description = "Merged profile after the change"),
        (status = 400, description = "Unknown status value"),
        (status = 403, description = "Target is another doctor")
    ),
    tags = ["doctors"],
    operation_id = "updateDoctorStatus"
)]
#[put("/doctors/{id}/status")]
pub async fn update_doctor_status(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<StatusBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner())?;
    let status = AvailabilityStatus::parse(&payload.status)
        .map_err(|error| Error::invalid_request(error.to_string()))?;
    let doctor = state
        .directory
        .update_status(auth.token(), &id, status)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "doctor": doctor })))
}
