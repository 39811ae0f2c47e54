//! Authentication and profile API handlers.
//!
//! ```text
//! POST /api/v1/auth/signup
//! POST /api/v1/auth/signin
//! GET  /api/v1/auth/user
//! POST /api/v1/auth/logout
//! PUT  /api/v1/users/{id}
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{IdentityService, SignupProfile, SignupRequest, UserPatch};
use crate::domain::{EmailAddress, Error, Password, Role, UserId};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body; role-specific fields ride along flattened.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    /// Login email.
    pub email: String,
    /// Initial password, at least six characters.
    pub password: String,
    /// Display name.
    pub name: String,
    /// `patient` or `doctor`.
    pub role: Role,
    /// Optional profile fields (phone, age, doctor specialization, …).
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub profile: SignupProfile,
}

impl TryFrom<SignupBody> for SignupRequest {
    type Error = Error;

    fn try_from(body: SignupBody) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&body.email)
            .map_err(|error| Error::invalid_request(error.to_string()))?;
        let password = Password::new(body.password)
            .map_err(|error| Error::invalid_request(error.to_string()))?;
        let name = body.name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::invalid_request("name must not be empty"));
        }
        Ok(Self {
            email,
            password,
            name,
            role: body.role,
            profile: body.profile,
        })
    }
}

/// Signin request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninBody {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Create an account and its stored profile records.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupBody,
    responses(
        (status = 200, description = "Account created; body carries the merged user view"),
        (status = 400, description = "Missing or invalid fields, or email already registered"),
        (status = 500, description = "Identity provider failure")
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    let user = state.identity.signup(request).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Authenticate and open a session.
///
/// Every rejection answers the same `invalid credentials` message so the
/// endpoint never reveals whether an email is registered.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    request_body = SigninBody,
    responses(
        (status = 200, description = "Session opened: {access_token, user}"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Identity provider failure")
    ),
    tags = ["auth"],
    operation_id = "signin",
    security([])
)]
#[post("/auth/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    payload: web::Json<SigninBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let email = EmailAddress::new(&body.email)
        .map_err(|_| Error::unauthorized("invalid credentials"))?;
    let password =
        Password::new(body.password).map_err(|_| Error::unauthorized("invalid credentials"))?;
    let session = state.identity.signin(&email, &password).await?;
    Ok(HttpResponse::Ok().json(json!({
        "access_token": session.access_token.expose(),
        "user": session.user,
    })))
}

/// Resolve the current session to the caller's merged profile view.
#[utoipa::path(
    get,
    path = "/api/v1/auth/user",
    responses(
        (status = 200, description = "Current user"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let user = state.identity.current_user(auth.token()).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Invalidate the session. Idempotent: a missing or already-dead token
/// still answers success.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "Logged out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    auth: Option<BearerAuth>,
) -> ApiResult<HttpResponse> {
    state
        .identity
        .logout(auth.as_ref().map(BearerAuth::token))
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out successfully" })))
}

/// Patch the caller's own profile.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    responses(
        (status = 200, description = "Merged view after the patch"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 403, description = "Target is another user"),
        (status = 404, description = "No such user")
    ),
    tags = ["auth"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<UserPatch>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner())
        .map_err(|error| Error::invalid_request(error.to_string()))?;
    let user = state
        .identity
        .update_user(auth.token(), &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
