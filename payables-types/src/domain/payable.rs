//! Payable domain model and the settlement fee rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amount::Amount;
use super::transaction::{Method, TransactionId};
use crate::error::DomainError;

/// Unique identifier for a Payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PayableId(Uuid);

impl PayableId {
    /// Creates a new random PayableId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PayableId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PayableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PayableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settlement status of a payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PayableStatus {
    /// Funds already settled
    Paid,
    /// Funds will be released later
    WaitingFunds,
}

impl PayableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayableStatus::Paid => "paid",
            PayableStatus::WaitingFunds => "waiting_funds",
        }
    }
}

impl std::str::FromStr for PayableStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PayableStatus::Paid),
            "waiting_funds" => Ok(PayableStatus::WaitingFunds),
            _ => Err(DomainError::ValidationError(format!(
                "unknown payable status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fee and status owed for a transaction value under a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub status: PayableStatus,
    /// Fee percentage label, stored verbatim
    pub tax: i64,
    /// Value net of the fee, floored
    pub total: i64,
}

impl Settlement {
    /// Applies the static fee table.
    ///
    /// | method      | tax | status        |
    /// |-------------|-----|---------------|
    /// | boleto      | 1   | waiting_funds |
    /// | debit_card  | 2   | paid          |
    /// | credit_card | 5   | waiting_funds |
    pub fn for_method(method: Method, value: Amount) -> Self {
        let (tax, status) = match method {
            Method::Boleto => (1, PayableStatus::WaitingFunds),
            Method::DebitCard => (2, PayableStatus::Paid),
            Method::CreditCard => (5, PayableStatus::WaitingFunds),
        };

        Self {
            status,
            tax,
            total: value.net_of_percent(tax),
        }
    }
}

/// Settlement record derived from a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Payable {
    /// Unique identifier
    pub id: PayableId,
    /// Transaction this payable settles
    pub transaction_id: TransactionId,
    pub status: PayableStatus,
    /// Originating transaction value
    #[schema(example = 100)]
    pub subtotal: i64,
    /// Fee percentage
    #[schema(example = 5)]
    pub tax: i64,
    /// Subtotal net of the fee
    #[schema(example = 95)]
    pub total: i64,
    /// When the payable was created
    pub created_at: DateTime<Utc>,
}

impl Payable {
    /// Reconstructs a payable from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PayableId,
        transaction_id: TransactionId,
        status: PayableStatus,
        subtotal: i64,
        tax: i64,
        total: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            transaction_id,
            status,
            subtotal,
            tax,
            total,
            created_at,
        }
    }
}
