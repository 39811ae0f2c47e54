//! Helpers for handler tests: a fully wired in-memory state bundle.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::{
    AppointmentServiceImpl, ContentCatalogueImpl, DoctorDirectoryImpl, IdentityServiceImpl,
    MessagingServiceImpl, PaymentLedgerImpl, Records,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::MemoryIdentityProvider;
use crate::outbound::store::MemoryRecordStore;

/// Build an [`HttpState`] over fresh in-memory adapters.
pub(crate) fn test_state() -> web::Data<HttpState> {
    let provider = Arc::new(MemoryIdentityProvider::new());
    let records = Records::new(Arc::new(MemoryRecordStore::new()));
    let clock = Arc::new(DefaultClock);
    web::Data::new(HttpState {
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
    })
}
