//! # Payments Client SDK
//!
//! A typed Rust client for the payment records API.

use payments_model::{
    CreatePaymentRequest, CreatePaymentResponse, HealthResponse, Payment, PaymentCollection,
};
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

/// Payment records API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Uses a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Checks if the API is up.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        handle_response(resp).await
    }

    /// Creates a payment and returns its id.
    pub async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, ClientError> {
        let resp = self.http.post(self.url("/payment")).json(req).send().await?;
        handle_response(resp).await
    }

    /// Lists all payments.
    pub async fn list_payments(&self) -> Result<PaymentCollection, ClientError> {
        let resp = self.http.get(self.url("/payment")).send().await?;
        handle_response(resp).await
    }

    /// Gets a payment by id. Returns `None` when the server reports 404.
    pub async fn get_payment(&self, id: &str) -> Result<Option<Payment>, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/payment/{}", id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let collection: PaymentCollection = handle_response(resp).await?;
        Ok(collection.data.into_iter().next())
    }

    /// Replaces a payment.
    pub async fn update_payment(
        &self,
        id: &str,
        req: &CreatePaymentRequest,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("/payment/{}", id)))
            .json(req)
            .send()
            .await?;
        handle_empty(resp).await
    }

    /// Deletes a payment.
    pub async fn delete_payment(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/payment/{}", id)))
            .send()
            .await?;
        handle_empty(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(api_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(api_error(status, resp).await)
    }
}

async fn api_error(status: StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Pulls `message` out of an error envelope, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body)
}
