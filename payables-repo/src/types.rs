//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use payables_types::{
    Amount, Card, DomainError, Method, Payable, PayableId, PayableStatus, PaymentMethod,
    RepoError, Transaction, TransactionId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

/// Column list shared by every transaction query.
pub const TRANSACTION_COLUMNS: &str =
    "id, value, description, method, card_number, card_holder_name, card_expiration, card_cvv";

/// Column list shared by every payable query.
pub const PAYABLE_COLUMNS: &str = "id, transaction_id, status, subtotal, tax, total, created_at";

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Transaction row from database.
#[derive(FromRow)]
pub struct DbTransaction {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub value: i64,
    pub description: Option<String>,
    pub method: String,
    pub card_number: Option<String>,
    pub card_holder_name: Option<String>,
    pub card_expiration: Option<String>,
    pub card_cvv: Option<String>,
}

/// Payable row from database.
#[derive(FromRow)]
pub struct DbPayable {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    #[cfg(not(feature = "sqlite"))]
    pub transaction_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub transaction_id: String,

    pub status: String,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

/// Card columns as bound on insert; all `None` for a boleto.
pub struct CardColumns<'a> {
    pub number: Option<&'a str>,
    pub holder_name: Option<&'a str>,
    pub expiration: Option<&'a str>,
    pub cvv: Option<&'a str>,
}

impl<'a> CardColumns<'a> {
    pub fn of(payment: &'a PaymentMethod) -> Self {
        let card = payment.card();
        Self {
            number: card.map(|c| c.number.as_str()),
            holder_name: card.map(|c| c.holder_name.as_str()),
            expiration: card.map(|c| c.expiration.as_str()),
            cvv: card.map(|c| c.cvv.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

// A stored value that no longer parses is a storage fault, not bad input.
pub fn parse_method(s: &str) -> Result<Method, RepoError> {
    s.parse()
        .map_err(|e: DomainError| RepoError::Database(e.to_string()))
}

pub fn parse_payable_status(s: &str) -> Result<PayableStatus, RepoError> {
    s.parse()
        .map_err(|e: DomainError| RepoError::Database(e.to_string()))
}

#[cfg(feature = "sqlite")]
fn parse_uuid(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(|e| RepoError::Database(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbTransaction {
    /// Convert database row to domain Transaction.
    pub fn into_domain(self) -> Result<Transaction, RepoError> {
        let method = parse_method(&self.method)?;
        let value = Amount::new(self.value)?;

        let card = match (
            self.card_number,
            self.card_holder_name,
            self.card_expiration,
            self.card_cvv,
        ) {
            (Some(number), Some(holder_name), Some(expiration), Some(cvv)) => Some(Card {
                number,
                holder_name,
                expiration,
                cvv,
            }),
            _ => None,
        };

        let payment = PaymentMethod::from_parts(method, card)
            .ok_or(RepoError::Domain(DomainError::MissingCard(method)))?;

        #[cfg(not(feature = "sqlite"))]
        let id = TransactionId::from_uuid(self.id);

        #[cfg(feature = "sqlite")]
        let id = TransactionId::from_uuid(parse_uuid(&self.id)?);

        Ok(Transaction::from_parts(id, value, self.description, payment))
    }
}

impl DbPayable {
    /// Convert database row to domain Payable.
    pub fn into_domain(self) -> Result<Payable, RepoError> {
        let status = parse_payable_status(&self.status)?;

        #[cfg(not(feature = "sqlite"))]
        let (id, transaction_id, created_at) = (
            PayableId::from_uuid(self.id),
            TransactionId::from_uuid(self.transaction_id),
            self.created_at,
        );

        #[cfg(feature = "sqlite")]
        let (id, transaction_id, created_at) = {
            let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| RepoError::Database(e.to_string()))?
                .with_timezone(&chrono::Utc);

            (
                PayableId::from_uuid(parse_uuid(&self.id)?),
                TransactionId::from_uuid(parse_uuid(&self.transaction_id)?),
                created_at,
            )
        };

        Ok(Payable::from_parts(
            id,
            transaction_id,
            status,
            self.subtotal,
            self.tax,
            self.total,
            created_at,
        ))
    }
}
