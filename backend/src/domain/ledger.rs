//! Append-only payment and withdrawal ledger entries.
//!
//! No reconciliation or balance computation happens here: entries are
//! written once with a fixed status and never transitioned.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::UserId;
use super::appointment::AppointmentId;

/// Validation errors raised by ledger primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerValidationError {
    /// Amount was zero or negative.
    NonPositiveAmount {
        /// The rejected value.
        value: i64,
    },
    /// Identifier did not carry the expected prefix.
    MalformedId,
}

impl fmt::Display for LedgerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount { value } => {
                write!(f, "amount must be greater than zero, got {value}")
            }
            Self::MalformedId => write!(f, "ledger id must carry its kind prefix"),
        }
    }
}

impl std::error::Error for LedgerValidationError {}

/// Strictly positive monetary amount in currency minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    /// Validate and construct an [`Amount`].
    pub fn new(value: i64) -> Result<Self, LedgerValidationError> {
        if value <= 0 {
            return Err(LedgerValidationError::NonPositiveAmount { value });
        }
        Ok(Self(value))
    }

    /// The raw amount value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = LedgerValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! ledger_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from an existing string.
            pub fn new(raw: impl Into<String>) -> Result<Self, LedgerValidationError> {
                let raw = raw.into();
                match raw.strip_prefix($prefix) {
                    Some(suffix) if !suffix.is_empty() => Ok(Self(raw)),
                    _ => Err(LedgerValidationError::MalformedId),
                }
            }

            /// Generate a fresh unique identifier.
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Borrow the raw identifier string.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = LedgerValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

ledger_id! {
    /// Generated payment identifier of the form `pay_<suffix>`.
    PaymentId, "pay_"
}

ledger_id! {
    /// Generated withdrawal identifier of the form `wd_<suffix>`.
    WithdrawalId, "wd_"
}

/// Payment status; fixed at creation, never transitioned in current scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The only value a payment ever takes; no gateway round-trip is
    /// modelled.
    Completed,
}

/// Withdrawal status; fixed at creation, never transitioned in current
/// scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    /// The only value a withdrawal request ever takes.
    Pending,
}

/// Ledger entry stored under `payment:<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Generated identifier.
    #[schema(value_type = String, example = "pay_51c3aa")]
    pub id: PaymentId,
    /// Paying user; set at creation and never reassigned.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Optional link to the appointment being paid for; not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub appointment_id: Option<AppointmentId>,
    /// Paid amount in minor units.
    #[schema(value_type = i64, example = 100)]
    pub amount: Amount,
    /// Payment method label, e.g. `card` or `wallet`.
    pub method: String,
    /// Always `completed`.
    pub status: PaymentStatus,
    /// Creation instant; write-once.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// Ledger entry stored under `withdrawal:<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Generated identifier.
    #[schema(value_type = String, example = "wd_0be512")]
    pub id: WithdrawalId,
    /// Requesting doctor; set at creation and never reassigned.
    #[schema(value_type = String)]
    pub doctor_id: UserId,
    /// Requested amount in minor units.
    #[schema(value_type = i64, example = 250)]
    pub amount: Amount,
    /// Payout method label, e.g. `bank_transfer`.
    pub method: String,
    /// Free-text payout account details.
    pub account_details: String,
    /// Always `pending`.
    pub status: WithdrawalStatus,
    /// Creation instant; write-once.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}
