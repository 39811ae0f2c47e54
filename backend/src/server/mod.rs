//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use mockable::Clock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{IdentityProvider, RecordStore};
use crate::domain::{
    AppointmentServiceImpl, ContentCatalogueImpl, DoctorDirectoryImpl, IdentityServiceImpl,
    MessagingServiceImpl, PaymentLedgerImpl, Records,
};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{health, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{appointments, auth, content, doctors, messages, payments};
use crate::middleware::Trace;

/// Wire every service implementation over one provider, store, and clock.
pub fn build_http_state<P>(
    provider: Arc<P>,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    P: IdentityProvider + 'static,
{
    let records = Records::new(store);
    HttpState {
        identity: Arc::new(IdentityServiceImpl::new(
            provider.clone(),
            records.clone(),
            clock.clone(),
        )),
        appointments: Arc::new(AppointmentServiceImpl::new(
            provider.clone(),
            records.clone(),
            clock.clone(),
        )),
        messaging: Arc::new(MessagingServiceImpl::new(
            provider.clone(),
            records.clone(),
            clock.clone(),
        )),
        directory: Arc::new(DoctorDirectoryImpl::new(provider.clone(), records.clone())),
        ledger: Arc::new(PaymentLedgerImpl::new(provider, records.clone(), clock)),
        content: Arc::new(ContentCatalogueImpl::new(records)),
    }
}

/// Dependency bundle handed to [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Shared readiness and liveness state.
    pub health_state: web::Data<HealthState>,
    /// Port bundle consumed by HTTP handlers.
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application: middleware, JSON error envelope, the
/// `/api/v1` scope, and the health probes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(auth::signup)
        .service(auth::signin)
        .service(auth::current_user)
        .service(auth::logout)
        .service(auth::update_user)
        .service(doctors::list_doctors)
        .service(doctors::get_doctor)
        .service(doctors::update_doctor)
        .service(doctors::update_doctor_status)
        .service(appointments::create_appointment)
        .service(appointments::list_appointments)
        .service(appointments::update_appointment_status)
        .service(appointments::delete_appointment)
        .service(messages::send_message)
        .service(messages::get_thread)
        .service(messages::get_conversations)
        .service(content::list_articles)
        .service(content::get_article)
        .service(content::list_health_tips)
        .service(payments::record_payment)
        .service(payments::request_withdrawal)
        .service(payments::list_withdrawals)
        .service(health);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    actix_web_prom::PrometheusMetricsBuilder::new("telecare")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
