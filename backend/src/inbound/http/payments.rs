//! Payment and withdrawal API handlers.
//!
//! ```text
//! POST /api/v1/payments
//! POST /api/v1/withdrawals
//! GET  /api/v1/withdrawals
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{PaymentLedger, RecordPaymentRequest, RequestWithdrawalRequest};
use crate::domain::{Amount, AppointmentId, Error};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn parse_amount(raw: i64) -> Result<Amount, Error> {
    Amount::new(raw).map_err(|error| Error::invalid_request(error.to_string()))
}

/// Payment request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBody {
    /// Optional appointment this payment is for.
    pub appointment_id: Option<String>,
    /// Amount in currency minor units; must be positive.
    pub amount: i64,
    /// Payment method label.
    pub method: String,
}

/// Withdrawal request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalBody {
    /// Amount in currency minor units; must be positive.
    pub amount: i64,
    /// Payout method label.
    pub method: String,
    /// Free-text payout account details.
    pub account_details: String,
}

/// Append a payment entry. No gateway round-trip is modelled: the entry is
/// written as `completed`.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = PaymentBody,
    responses(
        (status = 200, description = "Recorded payment"),
        (status = 400, description = "Non-positive amount"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["payments"],
    operation_id = "recordPayment"
)]
#[post("/payments")]
pub async fn record_payment(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<PaymentBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let amount = parse_amount(body.amount)?;
    let appointment_id = body
        .appointment_id
        .map(AppointmentId::new)
        .transpose()
        .map_err(|error| Error::invalid_request(error.to_string()))?;
    let payment = state
        .ledger
        .record_payment(
            auth.token(),
            RecordPaymentRequest {
                appointment_id,
                amount,
                method: body.method,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "payment": payment })))
}

/// Append a withdrawal request; doctors only. No balance check happens
/// server-side.
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals",
    request_body = WithdrawalBody,
    responses(
        (status = 200, description = "Recorded withdrawal request, status pending"),
        (status = 400, description = "Non-positive amount"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 403, description = "Caller is not a doctor")
    ),
    tags = ["payments"],
    operation_id = "requestWithdrawal"
)]
#[post("/withdrawals")]
pub async fn request_withdrawal(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<WithdrawalBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let amount = parse_amount(body.amount)?;
    let withdrawal = state
        .ledger
        .request_withdrawal(
            auth.token(),
            RequestWithdrawalRequest {
                amount,
                method: body.method,
                account_details: body.account_details,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "withdrawal": withdrawal })))
}

/// List the caller's withdrawal requests, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/withdrawals",
    responses(
        (status = 200, description = "The caller's withdrawal requests"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["payments"],
    operation_id = "listWithdrawals"
)]
#[get("/withdrawals")]
pub async fn list_withdrawals(
    state: web::Data<HttpState>,
    auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let withdrawals = state.ledger.list_withdrawals(auth.token()).await?;
    Ok(HttpResponse::Ok().json(json!({ "withdrawals": withdrawals })))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::inbound::http::auth::{signin, signup};
    use crate::inbound::http::test_utils::test_state;

    fn test_app() -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(
            web::scope("/api/v1")
                .app_data(test_state())
                .service(signup)
                .service(signin)
                .service(record_payment)
                .service(request_withdrawal)
                .service(list_withdrawals),
        )
    }

    async fn register<S>(app: &S, email: &str, role: &str) -> String
    where
        S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
    {
        let signup_res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(json!({
                    "email": email,
                    "password": "secret-pass",
                    "name": "Casey",
                    "role": role,
                }))
                .to_request(),
        )
        .await;
        assert!(signup_res.status().is_success());

        let signin_res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signin")
                .set_json(json!({"email": email, "password": "secret-pass"}))
                .to_request(),
        )
        .await;
        let session: Value = actix_test::read_body_json(signin_res).await;
        session["access_token"].as_str().expect("token").to_owned()
    }

    #[rstest]
    #[case(0)]
    #[case(-20)]
    #[actix_web::test]
    async fn non_positive_amounts_are_rejected(#[case] amount: i64) {
        let app = actix_test::init_service(test_app()).await;
        let token = register(&app, "p@example.com", "patient").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/payments")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({"amount": amount, "method": "card"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn payments_record_as_completed() {
        let app = actix_test::init_service(test_app()).await;
        let token = register(&app, "p@example.com", "patient").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/payments")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({"amount": 100, "method": "card"}))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["payment"]["status"], "completed");
        assert_eq!(value["payment"]["amount"], 100);
    }

    #[actix_web::test]
    async fn withdrawals_are_forbidden_for_patients() {
        let app = actix_test::init_service(test_app()).await;
        let token = register(&app, "p@example.com", "patient").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/withdrawals")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "amount": 100,
                    "method": "bank_transfer",
                    "accountDetails": "IE29 AIBK",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn doctors_request_and_list_their_withdrawals() {
        let app = actix_test::init_service(test_app()).await;
        let token = register(&app, "d@example.com", "doctor").await;

        let create_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/withdrawals")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "amount": 250,
                    "method": "bank_transfer",
                    "accountDetails": "IE29 AIBK",
                }))
                .to_request(),
        )
        .await;
        assert!(create_res.status().is_success());
        let created: Value = actix_test::read_body_json(create_res).await;
        assert_eq!(created["withdrawal"]["status"], "pending");

        let list_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/withdrawals")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        let listed: Value = actix_test::read_body_json(list_res).await;
        assert_eq!(listed["withdrawals"].as_array().expect("array").len(), 1);
    }
}
