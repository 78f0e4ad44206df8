//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

use payables_types::{
    CreatePayableRequest, CreateTransactionRequest, Payable, PayableId, PayableRepository,
    RepoError, Transaction, TransactionId, TransactionRepository,
};

use crate::types::{CardColumns, DbPayable, DbTransaction, PAYABLE_COLUMNS, TRANSACTION_COLUMNS};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// One pool backs both the transaction and the payable ports.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own database,
        // so the pool must hold exactly one connection and never recycle it.
        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;

        tracing::debug!("SQLite repository ready at {}", database_url);
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction port
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for SqliteRepo {
    async fn save(&self, req: CreateTransactionRequest) -> Result<Transaction, RepoError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now().to_rfc3339();
        let card = CardColumns::of(&req.payment);

        sqlx::query(
            r#"INSERT INTO transactions (id, value, description, method, card_number, card_holder_name, card_expiration, card_cvv, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(req.value.value())
        .bind(&req.description)
        .bind(req.payment.method().as_str())
        .bind(card.number)
        .bind(card.holder_name)
        .bind(card.expiration)
        .bind(card.cvv)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Transaction::from_parts(
            TransactionId::from_uuid(id),
            req.value,
            req.description,
            req.payment,
        ))
    }

    async fn list(&self) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<DbTransaction> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions ORDER BY created_at ASC, rowid ASC",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }

    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let id_str = id.to_string();

        let row: Option<DbTransaction> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        ))
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbTransaction::into_domain).transpose()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payable port
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PayableRepository for SqliteRepo {
    async fn save(&self, req: CreatePayableRequest) -> Result<Payable, RepoError> {
        let id = PayableId::new();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"INSERT INTO payables (id, transaction_id, status, subtotal, tax, total, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(req.transaction_id.to_string())
        .bind(req.status.as_str())
        .bind(req.subtotal)
        .bind(req.tax)
        .bind(req.total)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Payable::from_parts(
            id,
            req.transaction_id,
            req.status,
            req.subtotal,
            req.tax,
            req.total,
            now,
        ))
    }

    async fn list(&self) -> Result<Vec<Payable>, RepoError> {
        let rows: Vec<DbPayable> = sqlx::query_as(&format!(
            "SELECT {} FROM payables ORDER BY created_at ASC, rowid ASC",
            PAYABLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayable::into_domain).collect()
    }
}
