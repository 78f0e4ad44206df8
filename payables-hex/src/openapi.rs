//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payables_types::domain::{
    Amount, Card, Method, Payable, PayableId, PayableStatus, PaymentMethod, Transaction,
    TransactionId,
};
use payables_types::dto::CreateTransactionRequest;
use utoipa::OpenApi;

// Path-only stubs; the real handlers are generic over the repositories.

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Record a transaction and derive its payable
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded, card number masked", body = Transaction),
        (status = 400, description = "Malformed or invalid payload", body = inline(serde_json::Value), example = json!({"error": "Validation error: card.cvv must have exactly 3 characters, got 4"})),
        (status = 500, description = "Storage failure", body = inline(serde_json::Value), example = json!({"ok": false, "error": "Database error: connection refused"}))
    )
)]
async fn create_transaction() {}

/// List all transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "Transactions in insertion order", body = Vec<Transaction>),
        (status = 500, description = "Storage failure")
    )
)]
async fn list_transactions() {}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = TransactionId, Path, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transaction details", body = Transaction),
        (status = 400, description = "Malformed transaction ID"),
        (status = 404, description = "Transaction not found", body = inline(serde_json::Value), example = json!({"message": "transaction not found"})),
        (status = 500, description = "Storage failure")
    )
)]
async fn get_transaction() {}

/// List all payables
#[utoipa::path(
    get,
    path = "/payables",
    tag = "payables",
    responses(
        (status = 200, description = "Payables in insertion order", body = Vec<Payable>),
        (status = 500, description = "Storage failure")
    )
)]
async fn list_payables() {}

/// OpenAPI documentation for the Payables API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payables Service API",
        version = "1.0.0",
        description = "Records credit card, debit card and boleto transactions and derives a payable with the method's fee and settlement status.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_transaction,
        list_transactions,
        get_transaction,
        list_payables,
    ),
    components(
        schemas(
            CreateTransactionRequest,
            Transaction,
            TransactionId,
            PaymentMethod,
            Method,
            Card,
            Amount,
            Payable,
            PayableId,
            PayableStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transactions", description = "Transaction recording and lookup"),
        (name = "payables", description = "Settlement records derived from transactions"),
    )
)]
pub struct ApiDoc;
