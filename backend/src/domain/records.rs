//! Typed accessors over the raw key-value record store.
//!
//! Every entity is stored under a `<kind>:<id>` string key, e.g.
//! `user:abc123` or `appointment:appt_9f8d2c`. The kind prefix is
//! load-bearing: it is what makes "all records of a kind" a prefix scan,
//! and any deployment reusing existing data must preserve it. This module
//! is a pure mapping layer; no business logic lives here.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::account::{UserAccount, UserId};
use super::appointment::{Appointment, AppointmentId};
use super::content::{Article, HealthTip};
use super::doctor::{DoctorExtension, ProfileView};
use super::error::Error;
use super::ledger::{Payment, WithdrawalRequest};
use super::message::Message;
use super::ports::{RecordStore, RecordStoreError};

/// Entity kinds sharing the store's key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `user:` profile records.
    User,
    /// `doctor:` professional extension records.
    Doctor,
    /// `appointment:` booking records.
    Appointment,
    /// `message:` direct messages.
    Message,
    /// `payment:` ledger entries.
    Payment,
    /// `withdrawal:` ledger entries.
    Withdrawal,
    /// `article:` editorial content.
    Article,
    /// `tip:` health tips.
    Tip,
}

impl RecordKind {
    /// The key prefix for this kind, including the trailing colon.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => "user:",
            Self::Doctor => "doctor:",
            Self::Appointment => "appointment:",
            Self::Message => "message:",
            Self::Payment => "payment:",
            Self::Withdrawal => "withdrawal:",
            Self::Article => "article:",
            Self::Tip => "tip:",
        }
    }

    /// Build the full store key for `id` within this kind.
    pub fn key(self, id: &str) -> String {
        format!("{}{id}", self.prefix())
    }
}

fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Backend { message } => {
            Error::internal(format!("record store error: {message}"))
        }
        RecordStoreError::Timeout { message } => {
            Error::timeout(format!("record store timed out: {message}"))
        }
    }
}

/// Typed accessor bundle over an injected [`RecordStore`].
///
/// Cloning is cheap; clones share the underlying store handle.
#[derive(Clone)]
pub struct Records {
    store: Arc<dyn RecordStore>,
}

impl Records {
    /// Wrap a raw store in typed accessors.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        id: &str,
    ) -> Result<Option<T>, Error> {
        let value = self
            .store
            .get(&kind.key(id))
            .await
            .map_err(map_store_error)?;
        match value {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|error| Error::internal(format!("corrupt {kind:?} record: {error}"))),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + Sync>(
        &self,
        kind: RecordKind,
        id: &str,
        record: &T,
    ) -> Result<(), Error> {
        let value = serde_json::to_value(record)
            .map_err(|error| Error::internal(format!("encode {kind:?} record: {error}")))?;
        self.store
            .set(&kind.key(id), value)
            .await
            .map_err(map_store_error)
    }

    /// Scan a whole kind, skipping records that no longer decode so one
    /// corrupt entry cannot take listings down with it.
    async fn scan<T: DeserializeOwned>(&self, kind: RecordKind) -> Result<Vec<T>, Error> {
        let values = self
            .store
            .scan_prefix(kind.prefix())
            .await
            .map_err(map_store_error)?;
        let mut records = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value(value) {
                Ok(record) => records.push(record),
                Err(error) => warn!(kind = ?kind, %error, "skipping undecodable record"),
            }
        }
        Ok(records)
    }

    async fn remove(&self, kind: RecordKind, id: &str) -> Result<(), Error> {
        self.store
            .delete(&kind.key(id))
            .await
            .map_err(map_store_error)
    }

    /// Fetch a user profile record.
    pub async fn user(&self, id: &UserId) -> Result<Option<UserAccount>, Error> {
        self.read(RecordKind::User, id.as_str()).await
    }

    /// Fetch a user profile record, failing with `NotFound` when absent.
    pub async fn require_user(&self, id: &UserId) -> Result<UserAccount, Error> {
        self.user(id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    /// Store a user profile record under its own id.
    pub async fn put_user(&self, account: &UserAccount) -> Result<(), Error> {
        self.write(RecordKind::User, account.id.as_str(), account)
            .await
    }

    /// Fetch a doctor extension record.
    pub async fn doctor(&self, id: &UserId) -> Result<Option<DoctorExtension>, Error> {
        self.read(RecordKind::Doctor, id.as_str()).await
    }

    /// Fetch a doctor extension record, failing with `NotFound` when absent.
    pub async fn require_doctor(&self, id: &UserId) -> Result<DoctorExtension, Error> {
        self.doctor(id)
            .await?
            .ok_or_else(|| Error::not_found("doctor not found"))
    }

    /// Store a doctor extension record under the doctor's user id.
    pub async fn put_doctor(
        &self,
        id: &UserId,
        extension: &DoctorExtension,
    ) -> Result<(), Error> {
        self.write(RecordKind::Doctor, id.as_str(), extension).await
    }

    /// Every user profile record, in store order. Doctor extensions carry
    /// no embedded id, so directory joins start from this scan.
    pub async fn users(&self) -> Result<Vec<UserAccount>, Error> {
        self.scan(RecordKind::User).await
    }

    /// Fetch an appointment record.
    pub async fn appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>, Error> {
        self.read(RecordKind::Appointment, id.as_str()).await
    }

    /// Fetch an appointment record, failing with `NotFound` when absent.
    pub async fn require_appointment(&self, id: &AppointmentId) -> Result<Appointment, Error> {
        self.appointment(id)
            .await?
            .ok_or_else(|| Error::not_found("appointment not found"))
    }

    /// Store an appointment record under its own id.
    pub async fn put_appointment(&self, appointment: &Appointment) -> Result<(), Error> {
        self.write(RecordKind::Appointment, appointment.id.as_str(), appointment)
            .await
    }

    /// Every appointment record, in store order.
    pub async fn appointments(&self) -> Result<Vec<Appointment>, Error> {
        self.scan(RecordKind::Appointment).await
    }

    /// Hard-delete an appointment record.
    pub async fn remove_appointment(&self, id: &AppointmentId) -> Result<(), Error> {
        self.remove(RecordKind::Appointment, id.as_str()).await
    }

    /// Store a message record under its own id.
    pub async fn put_message(&self, message: &Message) -> Result<(), Error> {
        self.write(RecordKind::Message, message.id.as_str(), message)
            .await
    }

    /// Every message record, in store order.
    pub async fn messages(&self) -> Result<Vec<Message>, Error> {
        self.scan(RecordKind::Message).await
    }

    /// Store a payment record under its own id.
    pub async fn put_payment(&self, payment: &Payment) -> Result<(), Error> {
        self.write(RecordKind::Payment, payment.id.as_str(), payment)
            .await
    }

    /// Store a withdrawal record under its own id.
    pub async fn put_withdrawal(&self, withdrawal: &WithdrawalRequest) -> Result<(), Error> {
        self.write(RecordKind::Withdrawal, withdrawal.id.as_str(), withdrawal)
            .await
    }

    /// Every withdrawal record, in store order.
    pub async fn withdrawals(&self) -> Result<Vec<WithdrawalRequest>, Error> {
        self.scan(RecordKind::Withdrawal).await
    }

    /// Fetch an article record.
    pub async fn article(&self, id: &str) -> Result<Option<Article>, Error> {
        self.read(RecordKind::Article, id).await
    }

    /// Store an article record under its own id.
    pub async fn put_article(&self, article: &Article) -> Result<(), Error> {
        self.write(RecordKind::Article, &article.id, article).await
    }

    /// Every article record, in store order.
    pub async fn articles(&self) -> Result<Vec<Article>, Error> {
        self.scan(RecordKind::Article).await
    }

    /// Store a health tip record under its own id.
    pub async fn put_tip(&self, tip: &HealthTip) -> Result<(), Error> {
        self.write(RecordKind::Tip, &tip.id, tip).await
    }

    /// Every health tip record, in store order.
    pub async fn tips(&self) -> Result<Vec<HealthTip>, Error> {
        self.scan(RecordKind::Tip).await
    }

    /// Project an account into the merged profile view, joining the doctor
    /// extension when the account is a doctor's.
    pub async fn profile_view(&self, account: UserAccount) -> Result<ProfileView, Error> {
        let doctor = if account.is_doctor() {
            self.doctor(&account.id).await?
        } else {
            None
        };
        Ok(ProfileView::project(account, doctor))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(RecordKind::User, "abc", "user:abc")]
    #[case(RecordKind::Doctor, "abc", "doctor:abc")]
    #[case(RecordKind::Appointment, "appt_1", "appointment:appt_1")]
    #[case(RecordKind::Message, "msg_1", "message:msg_1")]
    #[case(RecordKind::Payment, "pay_1", "payment:pay_1")]
    #[case(RecordKind::Withdrawal, "wd_1", "withdrawal:wd_1")]
    #[case(RecordKind::Article, "article_1", "article:article_1")]
    #[case(RecordKind::Tip, "tip_1", "tip:tip_1")]
    fn keys_follow_the_kind_prefix_scheme(
        #[case] kind: RecordKind,
        #[case] id: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(kind.key(id), expected);
    }

    #[test]
    fn store_errors_map_onto_the_taxonomy() {
        let backend = map_store_error(RecordStoreError::backend("down"));
        assert_eq!(backend.code(), ErrorCode::InternalError);
        let timeout = map_store_error(RecordStoreError::timeout("slow"));
        assert_eq!(timeout.code(), ErrorCode::Timeout);
    }
}
