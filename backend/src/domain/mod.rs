//! Domain primitives, aggregates, and service implementations.
//!
//! Types here are transport agnostic: inbound adapters translate them to
//! and from HTTP, and outbound adapters persist them through the ports in
//! [`ports`]. Invariants and serialisation contracts (serde) are documented
//! on each type.

pub mod account;
pub mod appointment;
mod appointment_service;
pub mod content;
mod content_service;
pub mod credentials;
mod directory_service;
pub mod doctor;
pub mod error;
mod identity_service;
pub mod ledger;
mod ledger_service;
pub mod message;
mod messaging_service;
pub mod ports;
pub mod records;
mod session;

pub use self::account::{AccountValidationError, EmailAddress, Role, UserAccount, UserId};
pub use self::appointment::{
    Appointment, AppointmentId, AppointmentStatus, AppointmentValidationError, AppointmentView,
};
pub use self::appointment_service::AppointmentServiceImpl;
pub use self::content::{Article, HealthTip};
pub use self::content_service::ContentCatalogueImpl;
pub use self::credentials::{AccessToken, CredentialValidationError, Password, PASSWORD_MIN};
pub use self::directory_service::DoctorDirectoryImpl;
pub use self::doctor::{
    AvailabilityStatus, DoctorExtension, DoctorValidationError, ProfileView, Rating,
};
pub use self::error::{Error, ErrorCode};
pub use self::identity_service::IdentityServiceImpl;
pub use self::ledger::{
    Amount, LedgerValidationError, Payment, PaymentId, PaymentStatus, WithdrawalId,
    WithdrawalRequest, WithdrawalStatus,
};
pub use self::ledger_service::PaymentLedgerImpl;
pub use self::message::{Conversation, Message, MessageId, MessageValidationError};
pub use self::messaging_service::MessagingServiceImpl;
pub use self::records::{RecordKind, Records};
