//! In-memory repository adapters.
//!
//! Used as test doubles and for running the server without a database.
//! Each adapter can be seeded with initial data and configured with a
//! failure that every operation returns. Clones share the same storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use payables_types::{
    CreatePayableRequest, CreateTransactionRequest, Payable, PayableId, PayableRepository,
    RepoError, Transaction, TransactionId, TransactionRepository,
};

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory transaction store.
#[derive(Clone, Default)]
pub struct InMemoryTransactionRepo {
    data: Arc<RwLock<Vec<Transaction>>>,
    error: Option<RepoError>,
}

impl InMemoryTransactionRepo {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing transactions.
    pub fn with_data(initial: Vec<Transaction>) -> Self {
        Self {
            data: Arc::new(RwLock::new(initial)),
            error: None,
        }
    }

    /// Makes every operation fail with `error`.
    pub fn failing(mut self, error: RepoError) -> Self {
        self.error = Some(error);
        self
    }

    fn check(&self) -> Result<(), RepoError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepo {
    async fn save(&self, req: CreateTransactionRequest) -> Result<Transaction, RepoError> {
        self.check()?;

        let transaction = Transaction::new(req.value, req.description, req.payment);
        self.data.write().await.push(transaction.clone());

        Ok(transaction)
    }

    async fn list(&self) -> Result<Vec<Transaction>, RepoError> {
        self.check()?;
        Ok(self.data.read().await.clone())
    }

    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        self.check()?;
        Ok(self.data.read().await.iter().find(|t| t.id == id).cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payables
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory payable store.
#[derive(Clone, Default)]
pub struct InMemoryPayableRepo {
    data: Arc<RwLock<Vec<Payable>>>,
    error: Option<RepoError>,
}

impl InMemoryPayableRepo {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing payables.
    pub fn with_data(initial: Vec<Payable>) -> Self {
        Self {
            data: Arc::new(RwLock::new(initial)),
            error: None,
        }
    }

    /// Makes every operation fail with `error`.
    pub fn failing(mut self, error: RepoError) -> Self {
        self.error = Some(error);
        self
    }

    fn check(&self) -> Result<(), RepoError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PayableRepository for InMemoryPayableRepo {
    async fn save(&self, req: CreatePayableRequest) -> Result<Payable, RepoError> {
        self.check()?;

        let payable = Payable::from_parts(
            PayableId::new(),
            req.transaction_id,
            req.status,
            req.subtotal,
            req.tax,
            req.total,
            Utc::now(),
        );
        self.data.write().await.push(payable.clone());

        Ok(payable)
    }

    async fn list(&self) -> Result<Vec<Payable>, RepoError> {
        self.check()?;
        Ok(self.data.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use payables_types::{Amount, Card, PayableStatus, PaymentMethod};

    use super::*;

    fn sample_request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            value: Amount::new(200).unwrap(),
            description: Some("Sample Transaction".into()),
            payment: PaymentMethod::CreditCard {
                card: Card {
                    number: "1234567812345678".into(),
                    holder_name: "John Doe".into(),
                    expiration: "12/25".into(),
                    cvv: "123".into(),
                },
            },
        }
    }

    fn sample_payable_request() -> CreatePayableRequest {
        CreatePayableRequest {
            transaction_id: TransactionId::new(),
            status: PayableStatus::Paid,
            subtotal: 10000,
            tax: 2,
            total: 9800,
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryTransactionRepo::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_keeps_fields() {
        let repo = InMemoryTransactionRepo::new();
        let req = sample_request();

        let tx = repo.save(req.clone()).await.unwrap();

        assert_eq!(tx.value, req.value);
        assert_eq!(tx.description, req.description);
        assert_eq!(tx.payment, req.payment);
    }

    #[tokio::test]
    async fn test_get_by_id_after_save() {
        let repo = InMemoryTransactionRepo::new();
        let saved = repo.save(sample_request()).await.unwrap();

        let fetched = repo.get_by_id(saved.id).await.unwrap();

        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let repo = InMemoryTransactionRepo::new();
        assert!(repo.get_by_id(TransactionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seeded_data_is_listed_in_order() {
        let first = Transaction::new(Amount::new(100).unwrap(), None, PaymentMethod::Boleto);
        let second = Transaction::new(Amount::new(200).unwrap(), None, PaymentMethod::Boleto);
        let repo = InMemoryTransactionRepo::with_data(vec![first.clone(), second.clone()]);

        assert_eq!(repo.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryTransactionRepo::new();
        let handle = repo.clone();

        repo.save(sample_request()).await.unwrap();

        assert_eq!(handle.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_configured_error_fails_every_operation() {
        let err = RepoError::Database("Test error".into());
        let repo = InMemoryTransactionRepo::new().failing(err.clone());

        assert_eq!(repo.list().await.unwrap_err(), err);
        assert_eq!(repo.save(sample_request()).await.unwrap_err(), err);
        assert_eq!(repo.get_by_id(TransactionId::new()).await.unwrap_err(), err);
    }

    #[tokio::test]
    async fn test_payable_save_and_list() {
        let repo = InMemoryPayableRepo::new();
        let req = sample_payable_request();

        let payable = repo.save(req.clone()).await.unwrap();

        assert_eq!(payable.transaction_id, req.transaction_id);
        assert_eq!(payable.subtotal, 10000);
        assert_eq!(payable.tax, 2);
        assert_eq!(payable.total, 9800);
        assert_eq!(repo.list().await.unwrap(), vec![payable]);
    }

    #[tokio::test]
    async fn test_payable_configured_error() {
        let err = RepoError::Database("test error".into());
        let repo = InMemoryPayableRepo::new().failing(err.clone());

        assert_eq!(repo.save(sample_payable_request()).await.unwrap_err(), err);
        assert_eq!(repo.list().await.unwrap_err(), err);
    }
}
