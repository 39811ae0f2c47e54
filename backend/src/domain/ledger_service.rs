//! Payment and withdrawal ledger service.
//!
//! Entries are append-only with fixed statuses. No balance is computed
//! server-side: the observed source only ever displayed static figures, so
//! a running balance stays out of scope.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityProvider, PaymentLedger, RecordPaymentRequest, RequestWithdrawalRequest,
};
use crate::domain::session::resolve_caller;
use crate::domain::{
    AccessToken, Error, Payment, PaymentId, PaymentStatus, Role, WithdrawalId,
    WithdrawalRequest, WithdrawalStatus,
};

use super::records::Records;

/// Ledger service backed by the record store.
#[derive(Clone)]
pub struct PaymentLedgerImpl<P> {
    provider: Arc<P>,
    records: Records,
    clock: Arc<dyn Clock>,
}

impl<P> PaymentLedgerImpl<P> {
    /// Create a new ledger service.
    pub fn new(provider: Arc<P>, records: Records, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            records,
            clock,
        }
    }
}

#[async_trait]
impl<P> PaymentLedger for PaymentLedgerImpl<P>
where
    P: IdentityProvider,
{
    async fn record_payment(
        &self,
        token: &AccessToken,
        request: RecordPaymentRequest,
    ) -> Result<Payment, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let payment = Payment {
            id: PaymentId::generate(),
            user_id: caller.id,
            appointment_id: request.appointment_id,
            amount: request.amount,
            method: request.method,
            status: PaymentStatus::Completed,
            created_at: self.clock.utc(),
        };
        self.records.put_payment(&payment).await?;
        info!(payment = %payment.id, amount = payment.amount.value(), "payment recorded");
        Ok(payment)
    }

    async fn request_withdrawal(
        &self,
        token: &AccessToken,
        request: RequestWithdrawalRequest,
    ) -> Result<WithdrawalRequest, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        if caller.role != Role::Doctor {
            return Err(Error::forbidden("only doctors can request withdrawals"));
        }
        let withdrawal = WithdrawalRequest {
            id: WithdrawalId::generate(),
            doctor_id: caller.id,
            amount: request.amount,
            method: request.method,
            account_details: request.account_details,
            status: WithdrawalStatus::Pending,
            created_at: self.clock.utc(),
        };
        self.records.put_withdrawal(&withdrawal).await?;
        info!(withdrawal = %withdrawal.id, amount = withdrawal.amount.value(), "withdrawal requested");
        Ok(withdrawal)
    }

    async fn list_withdrawals(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<WithdrawalRequest>, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let mut mine: Vec<WithdrawalRequest> = self
            .records
            .withdrawals()
            .await?
            .into_iter()
            .filter(|withdrawal| withdrawal.doctor_id == caller.id)
            .collect();
        mine.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(mine)
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
