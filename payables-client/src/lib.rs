//! # Payables Client SDK
//!
//! A typed Rust client for the Payables API.

use payables_types::{CreateTransactionRequest, Payable, Transaction, TransactionId};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payables API client.
pub struct PayablesClient {
    base_url: String,
    http: Client,
}

impl PayablesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Records a transaction. The returned card number is already masked.
    pub async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<Transaction, ClientError> {
        let resp = self
            .http
            .post(self.url("/transactions"))
            .json(req)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Lists all transactions.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.get("/transactions").await
    }

    /// Gets a transaction by ID, `None` if the server has no such transaction.
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/transactions/{}", id)))
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        handle_response(resp).await.map(Some)
    }

    /// Lists all payables.
    pub async fn list_payables(&self) -> Result<Vec<Payable>, ClientError> {
        self.get("/payables").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)).send().await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Pulls the human-readable part out of an error body.
///
/// 400 and 500 bodies carry `error`, 404 bodies carry `message`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}
