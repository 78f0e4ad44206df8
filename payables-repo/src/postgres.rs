//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use payables_types::{
    CreatePayableRequest, CreateTransactionRequest, Payable, PayableId, PayableRepository,
    RepoError, Transaction, TransactionId, TransactionRepository,
};

use crate::types::{CardColumns, DbPayable, DbTransaction, PAYABLE_COLUMNS, TRANSACTION_COLUMNS};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository backing both the transaction and payable ports.
#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction port
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for PostgresRepo {
    async fn save(&self, req: CreateTransactionRequest) -> Result<Transaction, RepoError> {
        let id = Uuid::new_v4();
        let card = CardColumns::of(&req.payment);

        sqlx::query(
            r#"INSERT INTO transactions (id, value, description, method, card_number, card_holder_name, card_expiration, card_cvv, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(id)
        .bind(req.value.value())
        .bind(&req.description)
        .bind(req.payment.method().as_str())
        .bind(card.number)
        .bind(card.holder_name)
        .bind(card.expiration)
        .bind(card.cvv)
        .bind(Utc::now())
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
            "SELECT {} FROM transactions ORDER BY created_at ASC",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }

    async fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let row: Option<DbTransaction> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE id = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(id.into_uuid())
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
impl PayableRepository for PostgresRepo {
    async fn save(&self, req: CreatePayableRequest) -> Result<Payable, RepoError> {
        let id = PayableId::new();
        let now = Utc::now();

        sqlx::query(
            r#"INSERT INTO payables (id, transaction_id, status, subtotal, tax, total, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(id.into_uuid())
        .bind(req.transaction_id.into_uuid())
        .bind(req.status.as_str())
        .bind(req.subtotal)
        .bind(req.tax)
        .bind(req.total)
        .bind(now)
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
            "SELECT {} FROM payables ORDER BY created_at ASC",
            PAYABLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPayable::into_domain).collect()
    }
}
