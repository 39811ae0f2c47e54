//! Driving port for the payment and withdrawal ledger.

use async_trait::async_trait;

use crate::domain::{
    AccessToken, Amount, AppointmentId, Error, Payment, WithdrawalRequest,
};

/// Validated payment to append; status is fixed `completed` at creation.
#[derive(Debug, Clone)]
pub struct RecordPaymentRequest {
    /// Optional link to the appointment being paid for.
    pub appointment_id: Option<AppointmentId>,
    /// Paid amount in minor units.
    pub amount: Amount,
    /// Payment method label.
    pub method: String,
}

/// Validated withdrawal to append; status is fixed `pending` at creation.
#[derive(Debug, Clone)]
pub struct RequestWithdrawalRequest {
    /// Requested amount in minor units.
    pub amount: Amount,
    /// Payout method label.
    pub method: String,
    /// Free-text payout account details.
    pub account_details: String,
}

/// Domain use-case port for the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Append a payment entry for the caller.
    async fn record_payment(
        &self,
        token: &AccessToken,
        request: RecordPaymentRequest,
    ) -> Result<Payment, Error>;

    /// Append a withdrawal request; doctors only.
    async fn request_withdrawal(
        &self,
        token: &AccessToken,
        request: RequestWithdrawalRequest,
    ) -> Result<WithdrawalRequest, Error>;

    /// The caller's own withdrawal requests, newest first.
    async fn list_withdrawals(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<WithdrawalRequest>, Error>;
}
