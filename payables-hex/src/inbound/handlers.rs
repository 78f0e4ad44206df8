//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use payables_types::{
    AppError, CreateTransactionRequest, DomainError, PayableRepository, RepoError, TransactionId,
    TransactionRepository,
};

use crate::TransactionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<T: TransactionRepository, P: PayableRepository> {
    pub service: TransactionService<T, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        ApiError(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": msg })),
            )
                .into_response(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "ok": false, "error": msg })),
                )
                    .into_response()
            }
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Record a transaction and its payable.
///
/// Malformed bodies and constraint violations are rejected with 400 before
/// the service runs.
#[tracing::instrument(skip(state, body))]
pub async fn create_transaction<T: TransactionRepository, P: PayableRepository>(
    State(state): State<Arc<AppState<T, P>>>,
    body: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    req.validate()?;

    let tx = state.service.create_transaction_with_payable(req).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// List all transactions.
#[tracing::instrument(skip(state))]
pub async fn list_transactions<T: TransactionRepository, P: PayableRepository>(
    State(state): State<Arc<AppState<T, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.service.list_transactions().await?;
    Ok(Json(transactions))
}

/// Get transaction by ID.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn get_transaction<T: TransactionRepository, P: PayableRepository>(
    State(state): State<Arc<AppState<T, P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction_id: TransactionId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid transaction ID".into()))?;

    match state.service.get_transaction(transaction_id).await? {
        Some(tx) => Ok(Json(tx)),
        None => Err(AppError::NotFound("transaction not found".into()).into()),
    }
}

/// List all payables.
#[tracing::instrument(skip(state))]
pub async fn list_payables<T: TransactionRepository, P: PayableRepository>(
    State(state): State<Arc<AppState<T, P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let payables = state.service.list_payables().await?;
    Ok(Json(payables))
}
