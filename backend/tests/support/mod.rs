//! Shared helpers for end-to-end API tests: a fully assembled app over
//! in-memory adapters plus request shorthands.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test as actix_test, web, App};
use mockable::DefaultClock;
use serde_json::{json, Value};

use backend::inbound::http::health::HealthState;
use backend::outbound::identity::MemoryIdentityProvider;
use backend::outbound::store::MemoryRecordStore;
use backend::server::{build_app, build_http_state, AppDependencies};

/// Assemble the production app over fresh in-memory adapters.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let http_state = build_http_state(
        Arc::new(MemoryIdentityProvider::new()),
        Arc::new(MemoryRecordStore::new()),
        Arc::new(DefaultClock),
    );
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
    })
}

/// Bound on the initialised test service.
pub trait TestService:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> TestService for S where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

/// Sign up an account and open a session, returning `(user_id, token)`.
pub async fn register<S: TestService>(
    app: &S,
    email: &str,
    name: &str,
    role: &str,
) -> (String, String) {
    let signup_res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(json!({
                "email": email,
                "password": "secret-pass",
                "name": name,
                "role": role,
            }))
            .to_request(),
    )
    .await;
    assert!(
        signup_res.status().is_success(),
        "signup for {email} failed: {}",
        signup_res.status()
    );
    let created: Value = actix_test::read_body_json(signup_res).await;
    let id = created["user"]["id"].as_str().expect("user id").to_owned();

    let signin_res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/signin")
            .set_json(json!({"email": email, "password": "secret-pass"}))
            .to_request(),
    )
    .await;
    assert!(signin_res.status().is_success());
    let session: Value = actix_test::read_body_json(signin_res).await;
    let token = session["access_token"]
        .as_str()
        .expect("access token")
        .to_owned();
    (id, token)
}

/// GET with a bearer token, returning the JSON body.
pub async fn get_json<S: TestService>(app: &S, uri: &str, token: &str) -> Value {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "GET {uri}: {}", response.status());
    actix_test::read_body_json(response).await
}

/// POST JSON with a bearer token, returning the raw response.
pub async fn post_json<S: TestService>(
    app: &S,
    uri: &str,
    token: &str,
    body: Value,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body)
            .to_request(),
    )
    .await
}

/// PUT JSON with a bearer token, returning the raw response.
pub async fn put_json<S: TestService>(
    app: &S,
    uri: &str,
    token: &str,
    body: Value,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::put()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(body)
            .to_request(),
    )
    .await
}
