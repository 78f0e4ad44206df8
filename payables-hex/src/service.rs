//! Transaction Application Service
//!
//! Records transactions and their payables through the repository ports.

use payables_types::{
    CreatePayableRequest, CreateTransactionRequest, Payable, PayableRepository, RepoError,
    Transaction, TransactionId, TransactionRepository,
};

/// Application service for transactions and their payables.
///
/// Generic over both repository ports; the adapters are injected at construction.
/// Repository failures are returned exactly as the adapter produced them.
/// Nothing here retries, wraps, or compensates.
pub struct TransactionService<T: TransactionRepository, P: PayableRepository> {
    transactions: T,
    payables: P,
}

impl<T: TransactionRepository, P: PayableRepository> TransactionService<T, P> {
    /// Creates a new service with the given repositories.
    pub fn new(transactions: T, payables: P) -> Self {
        Self {
            transactions,
            payables,
        }
    }

    /// Returns a reference to the payable repository.
    pub fn payables(&self) -> &P {
        &self.payables
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a transaction and the payable derived from it.
    ///
    /// The card number is masked before anything is persisted. The payable is
    /// saved only after the transaction save completed, since it references the
    /// generated transaction id. If the payable save fails the transaction stays
    /// persisted and the payable error is returned.
    #[tracing::instrument(skip(self, req), fields(method = %req.payment.method(), value = %req.value))]
    pub async fn create_transaction_with_payable(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError> {
        let transaction = self.transactions.save(req.masked()).await?;

        let payable = CreatePayableRequest::for_transaction(&transaction);
        if let Err(err) = self.payables.save(payable).await {
            tracing::warn!(
                transaction_id = %transaction.id,
                error = %err,
                "transaction persisted without payable"
            );
            return Err(err);
        }

        tracing::info!(transaction_id = %transaction.id, "transaction created");
        Ok(transaction)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a transaction by ID. A missing transaction is `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, RepoError> {
        self.transactions.get_by_id(id).await
    }

    /// Lists all transactions.
    #[tracing::instrument(skip(self))]
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        self.transactions.list().await
    }

    /// Lists all payables.
    #[tracing::instrument(skip(self))]
    pub async fn list_payables(&self) -> Result<Vec<Payable>, RepoError> {
        self.payables.list().await
    }
}
