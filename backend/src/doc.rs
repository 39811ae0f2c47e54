//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST surface.
//! Swagger UI serves it in debug builds at `/docs`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::account::{Role, UserAccount};
use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::content::{Article, HealthTip};
use crate::domain::doctor::{AvailabilityStatus, DoctorExtension};
use crate::domain::ledger::{Payment, PaymentStatus, WithdrawalRequest, WithdrawalStatus};
use crate::domain::message::Message;
use crate::inbound::http;

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Telecare backend API",
        description = "Token-authenticated REST interface for appointments, \
                       messaging, the doctor directory, and the payment ledger."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        http::auth::signup,
        http::auth::signin,
        http::auth::current_user,
        http::auth::logout,
        http::auth::update_user,
        http::doctors::list_doctors,
        http::doctors::get_doctor,
        http::doctors::update_doctor,
        http::doctors::update_doctor_status,
        http::appointments::create_appointment,
        http::appointments::list_appointments,
        http::appointments::update_appointment_status,
        http::appointments::delete_appointment,
        http::messages::send_message,
        http::messages::get_thread,
        http::messages::get_conversations,
        http::content::list_articles,
        http::content::get_article,
        http::content::list_health_tips,
        http::payments::record_payment,
        http::payments::request_withdrawal,
        http::payments::list_withdrawals,
        http::health::health,
        http::health::ready,
    ),
    components(schemas(
        Role,
        UserAccount,
        DoctorExtension,
        AvailabilityStatus,
        Appointment,
        AppointmentStatus,
        Message,
        Payment,
        PaymentStatus,
        WithdrawalRequest,
        WithdrawalStatus,
        Article,
        HealthTip,
        http::auth::SignupBody,
        http::auth::SigninBody,
        http::doctors::StatusBody,
        http::appointments::BookBody,
        http::appointments::AppointmentStatusBody,
        http::messages::SendMessageBody,
        http::payments::PaymentBody,
        http::payments::WithdrawalBody,
    ))
)]
pub struct ApiDoc;
