//! Repository port traits.
//!
//! These are the primary ports in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) implement them.

use crate::domain::{Payable, Transaction, TransactionId};
use crate::dto::{CreatePayableRequest, CreateTransactionRequest};
use crate::error::RepoError;

/// Persistence port for transactions.
///
/// The adapter that saved a transaction is its only writer; reads return copies.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Persists a transaction, assigning its identifier.
    async fn save(&self, req: CreateTransactionRequest) -> Result<Transaction, RepoError>;

    /// Lists all transactions.
    async fn list(&self) -> Result<Vec<Transaction>, RepoError>;

    /// Gets a transaction by ID. A missing transaction is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError>;
}

/// Persistence port for payables.
#[async_trait::async_trait]
pub trait PayableRepository: Send + Sync + 'static {
    /// Persists a payable, assigning its identifier and creation time.
    async fn save(&self, req: CreatePayableRequest) -> Result<Payable, RepoError>;

    /// Lists all payables.
    async fn list(&self) -> Result<Vec<Payable>, RepoError>;
}
