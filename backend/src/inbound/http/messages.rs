//! Messaging API handlers.
//!
//! ```text
//! POST /api/v1/messages
//! GET  /api/v1/messages/{userId}
//! GET  /api/v1/conversations
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::MessagingService;
use crate::domain::{Error, UserId};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|error| Error::invalid_request(error.to_string()))
}

/// Send-message request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    /// Addressee.
    pub receiver_id: String,
    /// Message text.
    pub text: String,
}

/// Store a message from the caller. Delivery is poll-based; there is no
/// push channel or read receipt.
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    request_body = SendMessageBody,
    responses(
        (status = 200, description = "Stored message"),
        (status = 400, description = "Blank text or self-addressed message"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["messages"],
    operation_id = "sendMessage"
)]
#[post("/messages")]
pub async fn send_message(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<SendMessageBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let receiver_id = parse_user_id(body.receiver_id)?;
    let message = state
        .messaging
        .send(auth.token(), &receiver_id, &body.text)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

/// The full thread between the caller and one counterpart, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/messages/{userId}",
    responses(
        (status = 200, description = "Thread messages, ascending by creation time"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["messages"],
    operation_id = "getThread"
)]
#[get("/messages/{user_id}")]
pub async fn get_thread(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let other_id = parse_user_id(path.into_inner())?;
    let messages = state.messaging.thread_with(auth.token(), &other_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "messages": messages })))
}

/// The caller's conversation list: one entry per counterpart with the
/// most-recent message and the counterpart's current account snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    responses(
        (status = 200, description = "Conversations, newest first"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tags = ["messages"],
    operation_id = "getConversations"
)]
#[get("/conversations")]
pub async fn get_conversations(
    state: web::Data<HttpState>,
    auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let conversations = state.messaging.conversations(auth.token()).await?;
    Ok(HttpResponse::Ok().json(json!({ "conversations": conversations })))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
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
                .service(send_message)
                .service(get_thread)
                .service(get_conversations),
        )
    }

    async fn register<S>(app: &S, email: &str, role: &str) -> (String, String)
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
                    "name": email,
                    "role": role,
                }))
                .to_request(),
        )
        .await;
        let created: Value = actix_test::read_body_json(signup_res).await;
        let id = created["user"]["id"].as_str().expect("id").to_owned();

        let signin_res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signin")
                .set_json(json!({"email": email, "password": "secret-pass"}))
                .to_request(),
        )
        .await;
        let session: Value = actix_test::read_body_json(signin_res).await;
        let token = session["access_token"].as_str().expect("token").to_owned();
        (id, token)
    }

    #[actix_web::test]
    async fn send_then_read_thread_round_trips() {
        let app = actix_test::init_service(test_app()).await;
        let (doctor_id, doctor_token) = register(&app, "d@example.com", "doctor").await;
        let (patient_id, patient_token) = register(&app, "p@example.com", "patient").await;

        let send_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/messages")
                .insert_header(("Authorization", format!("Bearer {patient_token}")))
                .set_json(json!({"receiverId": doctor_id, "text": "hello doctor"}))
                .to_request(),
        )
        .await;
        assert!(send_res.status().is_success());
        let sent: Value = actix_test::read_body_json(send_res).await;
        assert_eq!(sent["message"]["senderId"], patient_id.as_str());

        let thread_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/messages/{patient_id}"))
                .insert_header(("Authorization", format!("Bearer {doctor_token}")))
                .to_request(),
        )
        .await;
        let thread: Value = actix_test::read_body_json(thread_res).await;
        let messages = thread["messages"].as_array().expect("array");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages.first().expect("message")["text"], "hello doctor");
    }

    #[actix_web::test]
    async fn blank_text_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let (doctor_id, _) = register(&app, "d@example.com", "doctor").await;
        let (_, patient_token) = register(&app, "p@example.com", "patient").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/messages")
                .insert_header(("Authorization", format!("Bearer {patient_token}")))
                .set_json(json!({"receiverId": doctor_id, "text": "  "}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["error"], "message text must not be empty");
    }

    #[actix_web::test]
    async fn conversations_require_a_token() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/conversations")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
