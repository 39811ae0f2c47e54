//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod appointments;
mod content;
mod directory;
mod identity;
mod identity_provider;
mod ledger;
mod messaging;
mod record_store;

#[cfg(test)]
pub use appointments::MockAppointmentService;
pub use appointments::{AppointmentService, BookAppointmentRequest};
#[cfg(test)]
pub use content::MockContentCatalogue;
pub use content::ContentCatalogue;
#[cfg(test)]
pub use directory::MockDoctorDirectory;
pub use directory::{DoctorDirectory, DoctorProfilePatch};
#[cfg(test)]
pub use identity::MockIdentityService;
pub use identity::{IdentityService, SessionView, SignupProfile, SignupRequest, UserPatch};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    IdentityProvider, IdentityProviderError, NewProviderAccount, ProviderSession,
};
#[cfg(test)]
pub use ledger::MockPaymentLedger;
pub use ledger::{PaymentLedger, RecordPaymentRequest, RequestWithdrawalRequest};
#[cfg(test)]
pub use messaging::MockMessagingService;
pub use messaging::MessagingService;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{RecordStore, RecordStoreError};
