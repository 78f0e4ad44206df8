//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use payables_types::{
        Amount, Card, CreatePayableRequest, CreateTransactionRequest, PayableRepository,
        PayableStatus, PaymentMethod, RepoError, TransactionId, TransactionRepository,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn card_request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            value: Amount::new(100).unwrap(),
            description: Some("Transaction 1".to_string()),
            payment: PaymentMethod::CreditCard {
                card: Card {
                    number: "**********345678".to_string(),
                    holder_name: "John Doe".to_string(),
                    expiration: "12/25".to_string(),
                    cvv: "123".to_string(),
                },
            },
        }
    }

    fn boleto_request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            value: Amount::new(250).unwrap(),
            description: None,
            payment: PaymentMethod::Boleto,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_card_transaction() {
        let repo = setup_repo().await;

        let saved = TransactionRepository::save(&repo, card_request())
            .await
            .unwrap();
        let fetched = repo.get_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(fetched, saved);
        assert_eq!(fetched.payment.card().unwrap().holder_name, "John Doe");
    }

    #[tokio::test]
    async fn test_boleto_round_trips_without_card() {
        let repo = setup_repo().await;

        let saved = TransactionRepository::save(&repo, boleto_request())
            .await
            .unwrap();
        let fetched = repo.get_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(fetched.payment, PaymentMethod::Boleto);
        assert!(fetched.description.is_none());
    }

    #[tokio::test]
    async fn test_get_transaction_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_by_id(TransactionId::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_transactions_in_insertion_order() {
        let repo = setup_repo().await;

        let first = TransactionRepository::save(&repo, card_request())
            .await
            .unwrap();
        let second = TransactionRepository::save(&repo, boleto_request())
            .await
            .unwrap();

        let listed = TransactionRepository::list(&repo).await.unwrap();

        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_card_method_row_without_card_is_rejected() {
        let repo = setup_repo().await;

        sqlx::query(
            r#"INSERT INTO transactions (id, value, description, method, created_at)
               VALUES (?, 10, NULL, 'debit_card', '2024-01-01T00:00:00+00:00')"#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .execute(repo.pool())
        .await
        .unwrap();

        assert!(TransactionRepository::list(&repo).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_stored_method_is_database_error() {
        let repo = setup_repo().await;

        sqlx::query(
            r#"INSERT INTO transactions (id, value, description, method, created_at)
               VALUES (?, 10, NULL, 'pix', '2024-01-01T00:00:00+00:00')"#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .execute(repo.pool())
        .await
        .unwrap();

        let err = TransactionRepository::list(&repo).await.unwrap_err();

        assert!(matches!(err, RepoError::Database(msg) if msg.contains("pix")));
    }

    #[tokio::test]
    async fn test_save_and_list_payables() {
        let repo = setup_repo().await;
        let tx = TransactionRepository::save(&repo, card_request())
            .await
            .unwrap();

        let saved = PayableRepository::save(
            &repo,
            CreatePayableRequest {
                transaction_id: tx.id,
                status: PayableStatus::WaitingFunds,
                subtotal: 100,
                tax: 5,
                total: 95,
            },
        )
        .await
        .unwrap();

        let listed = PayableRepository::list(&repo).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
        assert_eq!(listed[0].transaction_id, tx.id);
        assert_eq!(listed[0].status, PayableStatus::WaitingFunds);
        assert_eq!(listed[0].total, 95);
        assert_eq!(listed[0].created_at, saved.created_at);
    }
}
