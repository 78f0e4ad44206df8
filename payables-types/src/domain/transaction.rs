//! Transaction domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amount::Amount;
use super::card::Card;
use super::payable::Settlement;
use crate::error::DomainError;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    CreditCard,
    DebitCard,
    Boleto,
}

impl Method {
    /// Wire and storage name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::CreditCard => "credit_card",
            Method::DebitCard => "debit_card",
            Method::Boleto => "boleto",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Method::CreditCard),
            "debit_card" => Ok(Method::DebitCard),
            "boleto" => Ok(Method::Boleto),
            _ => Err(DomainError::ValidationError(format!(
                "unknown payment method: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific payment data.
///
/// Card methods always carry a [`Card`]; a boleto never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard { card: Card },
    DebitCard { card: Card },
    Boleto,
}

impl PaymentMethod {
    /// Builds the payment data from a method and optional card.
    ///
    /// Returns `None` when the card presence does not match the method.
    /// A card supplied alongside a boleto is dropped.
    pub fn from_parts(method: Method, card: Option<Card>) -> Option<Self> {
        match (method, card) {
            (Method::CreditCard, Some(card)) => Some(PaymentMethod::CreditCard { card }),
            (Method::DebitCard, Some(card)) => Some(PaymentMethod::DebitCard { card }),
            (Method::Boleto, _) => Some(PaymentMethod::Boleto),
            (_, None) => None,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            PaymentMethod::CreditCard { .. } => Method::CreditCard,
            PaymentMethod::DebitCard { .. } => Method::DebitCard,
            PaymentMethod::Boleto => Method::Boleto,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            PaymentMethod::CreditCard { card } | PaymentMethod::DebitCard { card } => Some(card),
            PaymentMethod::Boleto => None,
        }
    }

    /// Returns the same payment data with any card number masked.
    pub fn masked(&self) -> Self {
        match self {
            PaymentMethod::CreditCard { card } => PaymentMethod::CreditCard {
                card: card.masked(),
            },
            PaymentMethod::DebitCard { card } => PaymentMethod::DebitCard {
                card: card.masked(),
            },
            PaymentMethod::Boleto => PaymentMethod::Boleto,
        }
    }
}

/// A recorded payment transaction.
///
/// Transactions are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Value in smallest currency unit
    pub value: Amount,
    /// Free-form description, `null` when absent
    pub description: Option<String>,
    /// Method tag plus card data for card methods
    #[serde(flatten)]
    pub payment: PaymentMethod,
}

impl Transaction {
    /// Creates a new transaction with a fresh identifier.
    pub fn new(value: Amount, description: Option<String>, payment: PaymentMethod) -> Self {
        Self {
            id: TransactionId::new(),
            value,
            description,
            payment,
        }
    }

    /// Reconstructs a transaction from stored fields.
    pub fn from_parts(
        id: TransactionId,
        value: Amount,
        description: Option<String>,
        payment: PaymentMethod,
    ) -> Self {
        Self {
            id,
            value,
            description,
            payment,
        }
    }

    pub fn method(&self) -> Method {
        self.payment.method()
    }

    /// Settlement terms owed for this transaction.
    pub fn settlement(&self) -> Settlement {
        Settlement::for_method(self.method(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parses_its_own_name() {
        for method in [Method::CreditCard, Method::DebitCard, Method::Boleto] {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
        assert!(matches!(
            "pix".parse::<Method>(),
            Err(DomainError::ValidationError(_))
        ));
    }

    fn card() -> Card {
        Card {
            number: "1234567812345678".into(),
            holder_name: "John Doe".into(),
            expiration: "12/25".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn test_card_transaction_json_shape() {
        let tx = Transaction::new(
            Amount::new(100).unwrap(),
            Some("Transaction 1".into()),
            PaymentMethod::CreditCard { card: card() },
        );

        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["method"], "credit_card");
        assert_eq!(json["value"], 100);
        assert_eq!(json["card"]["holder_name"], "John Doe");
        assert_eq!(json["id"], tx.id.to_string());
    }

    #[test]
    fn test_boleto_transaction_has_no_card() {
        let tx = Transaction::new(Amount::new(100).unwrap(), None, PaymentMethod::Boleto);

        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["method"], "boleto");
        assert!(json.get("card").is_none());
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_transaction_round_trips_through_json() {
        let tx = Transaction::new(
            Amount::new(250).unwrap(),
            None,
            PaymentMethod::DebitCard { card: card() },
        );

        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tx);
    }

    #[test]
    fn test_from_parts_enforces_card_presence() {
        assert!(PaymentMethod::from_parts(Method::CreditCard, None).is_none());
        assert!(PaymentMethod::from_parts(Method::DebitCard, None).is_none());
        assert_eq!(
            PaymentMethod::from_parts(Method::Boleto, Some(card())),
            Some(PaymentMethod::Boleto)
        );
        assert_eq!(
            PaymentMethod::from_parts(Method::DebitCard, Some(card()))
                .map(|p| p.method()),
            Some(Method::DebitCard)
        );
    }

    #[test]
    fn test_masked_leaves_boleto_untouched() {
        assert_eq!(PaymentMethod::Boleto.masked(), PaymentMethod::Boleto);

        let masked = PaymentMethod::CreditCard { card: card() }.masked();
        assert_eq!(masked.card().unwrap().number, "**********345678");
    }
}
