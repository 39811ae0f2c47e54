//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentService, ContentCatalogue, DoctorDirectory, IdentityService, MessagingService,
    PaymentLedger,
};

/// Dependency bundle for HTTP handlers, one port per service.
#[derive(Clone)]
pub struct HttpState {
    /// Identity and session use-cases.
    pub identity: Arc<dyn IdentityService>,
    /// Appointment use-cases.
    pub appointments: Arc<dyn AppointmentService>,
    /// Messaging use-cases.
    pub messaging: Arc<dyn MessagingService>,
    /// Doctor directory use-cases.
    pub directory: Arc<dyn DoctorDirectory>,
    /// Payment and withdrawal ledger use-cases.
    pub ledger: Arc<dyn PaymentLedger>,
    /// Editorial content reads.
    pub content: Arc<dyn ContentCatalogue>,
}
