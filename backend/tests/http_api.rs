//! End-to-end coverage of the REST surface over in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{json, Value};

use support::{get_json, post_json, put_json, register, test_app};

#[actix_web::test]
async fn booking_lifecycle_scenario() {
    let app = actix_test::init_service(test_app()).await;
    let (doctor_id, doctor_token) = register(&app, "d@example.com", "Dr. Smith", "doctor").await;
    let (patient_id, patient_token) = register(&app, "p@example.com", "Pat", "patient").await;

    // Doctor signed up with default offline availability.
    let directory = get_json(&app, "/api/v1/doctors", &patient_token).await;
    let doctors = directory["doctors"].as_array().expect("doctors");
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["status"], "offline");

    // Patient books; the appointment starts pending.
    let create_res = post_json(
        &app,
        "/api/v1/appointments",
        &patient_token,
        json!({
            "doctorId": doctor_id,
            "date": "2025-12-01",
            "time": "10:00 AM",
            "reason": "annual checkup",
        }),
    )
    .await;
    assert!(create_res.status().is_success());
    let created: Value = actix_test::read_body_json(create_res).await;
    let appointment_id = created["appointment"]["id"].as_str().expect("id").to_owned();
    assert_eq!(created["appointment"]["status"], "pending");
    assert_eq!(created["appointment"]["patientId"], patient_id.as_str());

    // The doctor confirms; the patient's next read shows the new status
    // with the doctor's current name embedded.
    let confirm_res = put_json(
        &app,
        &format!("/api/v1/appointments/{appointment_id}"),
        &doctor_token,
        json!({"status": "confirmed"}),
    )
    .await;
    assert!(confirm_res.status().is_success());

    let listed = get_json(&app, "/api/v1/appointments", &patient_token).await;
    let appointments = listed["appointments"].as_array().expect("appointments");
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], "confirmed");
    assert_eq!(appointments[0]["doctor"]["name"], "Dr. Smith");
    assert!(appointments[0].get("updatedAt").is_some());

    // The patient deletes; the record disappears from both sides.
    let delete_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/appointments/{appointment_id}"))
            .insert_header(("Authorization", format!("Bearer {patient_token}")))
            .to_request(),
    )
    .await;
    assert!(delete_res.status().is_success());

    let for_patient = get_json(&app, "/api/v1/appointments", &patient_token).await;
    assert!(for_patient["appointments"].as_array().expect("array").is_empty());
    let for_doctor = get_json(&app, "/api/v1/appointments", &doctor_token).await;
    assert!(for_doctor["appointments"].as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn deleting_someone_elses_appointment_is_forbidden_and_harmless() {
    let app = actix_test::init_service(test_app()).await;
    let (doctor_id, _) = register(&app, "d@example.com", "Dr. Smith", "doctor").await;
    let (_, patient_token) = register(&app, "p@example.com", "Pat", "patient").await;
    let (_, intruder_token) = register(&app, "q@example.com", "Quinn", "patient").await;

    let create_res = post_json(
        &app,
        "/api/v1/appointments",
        &patient_token,
        json!({"doctorId": doctor_id, "date": "2025-12-01", "time": "10:00 AM"}),
    )
    .await;
    let created: Value = actix_test::read_body_json(create_res).await;
    let appointment_id = created["appointment"]["id"].as_str().expect("id").to_owned();

    let delete_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/appointments/{appointment_id}"))
            .insert_header(("Authorization", format!("Bearer {intruder_token}")))
            .to_request(),
    )
    .await;
    assert_eq!(delete_res.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(delete_res).await;
    assert!(body["error"].as_str().expect("error message").contains("patient"));

    let still_listed = get_json(&app, "/api/v1/appointments", &patient_token).await;
    assert_eq!(
        still_listed["appointments"].as_array().expect("array").len(),
        1
    );
}

#[actix_web::test]
async fn conversations_derive_the_latest_counterpart_message() {
    let app = actix_test::init_service(test_app()).await;
    let (doctor_id, doctor_token) = register(&app, "d@example.com", "Dr. Smith", "doctor").await;
    let (patient_id, patient_token) = register(&app, "p@example.com", "Pat", "patient").await;

    let first = post_json(
        &app,
        "/api/v1/messages",
        &patient_token,
        json!({"receiverId": doctor_id, "text": "hello doctor"}),
    )
    .await;
    assert!(first.status().is_success());
    let reply = post_json(
        &app,
        "/api/v1/messages",
        &doctor_token,
        json!({"receiverId": patient_id, "text": "hello patient"}),
    )
    .await;
    assert!(reply.status().is_success());
    let reply_body: Value = actix_test::read_body_json(reply).await;
    let reply_id = reply_body["message"]["id"].as_str().expect("id").to_owned();

    let conversations = get_json(&app, "/api/v1/conversations", &patient_token).await;
    let entries = conversations["conversations"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["partner"]["id"], doctor_id.as_str());
    assert_eq!(entries[0]["lastMessage"]["id"], reply_id.as_str());

    let thread = get_json(
        &app,
        &format!("/api/v1/messages/{doctor_id}"),
        &patient_token,
    )
    .await;
    let messages = thread["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["text"], "hello doctor");
    assert_eq!(messages[1]["text"], "hello patient");
}

#[actix_web::test]
async fn doctor_views_merge_without_dropping_fields() {
    let app = actix_test::init_service(test_app()).await;
    let (doctor_id, doctor_token) = register(&app, "d@example.com", "Dr. Smith", "doctor").await;

    let update_res = put_json(
        &app,
        &format!("/api/v1/doctors/{doctor_id}"),
        &doctor_token,
        json!({"specialization": "Cardiologist", "consultationFee": 100}),
    )
    .await;
    assert!(update_res.status().is_success());

    let fetched = get_json(
        &app,
        &format!("/api/v1/doctors/{doctor_id}"),
        &doctor_token,
    )
    .await;
    let doctor = &fetched["doctor"];
    for field in [
        "id",
        "email",
        "name",
        "role",
        "createdAt",
        "specialization",
        "experience",
        "consultationFee",
        "rating",
        "totalPatients",
        "status",
        "expertise",
        "about",
    ] {
        assert!(doctor.get(field).is_some(), "merged view dropped {field}");
    }
    assert_eq!(doctor["specialization"], "Cardiologist");
    assert_eq!(doctor["consultationFee"], 100);
}

#[actix_web::test]
async fn cross_user_profile_updates_are_forbidden() {
    let app = actix_test::init_service(test_app()).await;
    let (patient_id, _) = register(&app, "p@example.com", "Pat", "patient").await;
    let (_, other_token) = register(&app, "q@example.com", "Quinn", "patient").await;

    let response = put_json(
        &app,
        &format!("/api/v1/users/{patient_id}"),
        &other_token,
        json!({"name": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn logout_is_idempotent_over_http() {
    let app = actix_test::init_service(test_app()).await;
    let (_, token) = register(&app, "p@example.com", "Pat", "patient").await;

    for _ in 0..2 {
        let response = post_json(&app, "/api/v1/auth/logout", &token, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // The token is dead afterwards.
    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/auth/user")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn errors_use_the_envelope_and_responses_carry_a_trace_id() {
    let app = actix_test::init_service(test_app()).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/appointments")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "missing authorization header");
}

#[actix_web::test]
async fn health_endpoints_answer() {
    let app = actix_test::init_service(test_app()).await;

    let live = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/health").to_request(),
    )
    .await;
    assert!(live.status().is_success());
    let payload: Value = actix_test::read_body_json(live).await;
    assert_eq!(payload["status"], "ok");

    let ready = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert!(ready.status().is_success());
}
