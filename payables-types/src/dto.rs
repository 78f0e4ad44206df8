//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Amount, Card, PayableStatus, PaymentMethod, Transaction, TransactionId};
use crate::error::DomainError;

const MAX_TEXT_LEN: usize = 255;

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Value in smallest currency unit
    pub value: Amount,
    /// Optional description, up to 255 characters
    #[serde(default)]
    #[schema(example = "Order #1234")]
    pub description: Option<String>,
    /// `method` tag plus `card` for card methods
    #[serde(flatten)]
    pub payment: PaymentMethod,
}

impl CreateTransactionRequest {
    /// Checks the field constraints the decoder cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(description) = &self.description {
            check_max_len("description", description, MAX_TEXT_LEN)?;
        }

        if let Some(card) = self.payment.card() {
            validate_card(card)?;
        }

        Ok(())
    }

    /// Returns the request with any card number masked.
    pub fn masked(self) -> Self {
        Self {
            payment: self.payment.masked(),
            ..self
        }
    }
}

fn validate_card(card: &Card) -> Result<(), DomainError> {
    let number_len = card.number.chars().count();
    if !(12..=19).contains(&number_len) {
        return Err(DomainError::ValidationError(format!(
            "card.number must have between 12 and 19 characters, got {}",
            number_len
        )));
    }
    check_max_len("card.holder_name", &card.holder_name, MAX_TEXT_LEN)?;
    check_exact_len("card.expiration", &card.expiration, 5)?;
    check_exact_len("card.cvv", &card.cvv, 3)?;
    Ok(())
}

fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::ValidationError(format!(
            "{} must have at most {} characters, got {}",
            field, max, len
        )));
    }
    Ok(())
}

fn check_exact_len(field: &str, value: &str, expected: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len != expected {
        return Err(DomainError::ValidationError(format!(
            "{} must have exactly {} characters, got {}",
            field, expected, len
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Payable DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to persist a payable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePayableRequest {
    pub transaction_id: TransactionId,
    pub status: PayableStatus,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl CreatePayableRequest {
    /// Derives the payable for a persisted transaction.
    pub fn for_transaction(transaction: &Transaction) -> Self {
        let settlement = transaction.settlement();
        Self {
            transaction_id: transaction.id,
            status: settlement.status,
            subtotal: transaction.value.value(),
            tax: settlement.tax,
            total: settlement.total,
        }
    }
}
