//! End-to-end coverage of startup seeding: seeded doctors are real
//! accounts and seeded content is served by the API.

use std::sync::Arc;

use actix_web::test as actix_test;
use actix_web::web;
use mockable::DefaultClock;
use serde_json::{json, Value};

use backend::domain::ports::RecordStore;
use backend::domain::Records;
use backend::example_data::{seed_example_data_on_startup, ExampleDataSettings};
use backend::inbound::http::health::HealthState;
use backend::outbound::identity::MemoryIdentityProvider;
use backend::outbound::store::MemoryRecordStore;
use backend::server::{build_app, build_http_state, AppDependencies};

#[actix_web::test]
async fn seeded_catalogue_is_served_end_to_end() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
    let http_state = build_http_state(
        Arc::new(MemoryIdentityProvider::new()),
        store.clone(),
        Arc::new(DefaultClock),
    );

    let settings = ExampleDataSettings {
        enabled: Some(true),
    };
    let outcome = seed_example_data_on_startup(
        &settings,
        &http_state.identity,
        &Records::new(store),
    )
    .await
    .expect("seeding succeeds")
    .expect("seeding ran");
    assert_eq!(outcome.doctors_created, 5);

    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    let app = actix_test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
    }))
    .await;

    // The directory lists every seeded doctor with merged fields.
    let doctors_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/doctors").to_request(),
    )
    .await;
    assert!(doctors_res.status().is_success());
    let doctors: Value = actix_test::read_body_json(doctors_res).await;
    let listed = doctors["doctors"].as_array().expect("doctors");
    assert_eq!(listed.len(), 5);
    assert!(listed
        .iter()
        .any(|doctor| doctor["specialization"] == "Cardiologist"));

    // Seeded doctors can sign in with their catalogue credentials.
    let signin_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/signin")
            .set_json(json!({
                "email": "dr.smith@healthcare.com",
                "password": "doctor123",
            }))
            .to_request(),
    )
    .await;
    assert!(signin_res.status().is_success());
    let session: Value = actix_test::read_body_json(signin_res).await;
    assert_eq!(session["user"]["name"], "Dr. Sarah Smith");
    assert_eq!(session["user"]["rating"], 5.0);

    // Articles and tips are public reads.
    let articles_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/articles").to_request(),
    )
    .await;
    let articles: Value = actix_test::read_body_json(articles_res).await;
    assert_eq!(articles["articles"].as_array().expect("articles").len(), 4);

    let article_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/articles/article_2")
            .to_request(),
    )
    .await;
    let article: Value = actix_test::read_body_json(article_res).await;
    assert_eq!(article["article"]["title"], "The Healing Power of Turmeric");

    let tips_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/health-tips").to_request(),
    )
    .await;
    let tips: Value = actix_test::read_body_json(tips_res).await;
    assert_eq!(tips["tips"].as_array().expect("tips").len(), 4);
}
