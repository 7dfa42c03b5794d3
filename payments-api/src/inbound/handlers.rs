//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use payments_model::{
    AppError, CreatePaymentRequest, ErrorResponse, HealthResponse, PaymentStore, QuoteError,
};

use crate::PaymentService;
use crate::openapi::ApiDoc;
use crate::service::{CREATE_PARSE_FAILED, UPDATE_PARSE_FAILED};

/// Application state shared across handlers.
pub struct AppState<S: PaymentStore> {
    pub service: PaymentService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(None) => {
                return (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response();
            }
            AppError::NotFound(Some(msg)) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            err @ AppError::Upstream(QuoteError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            err @ AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = ErrorResponse {
            message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Decodes a payment request body, reporting any failure with `message`.
fn parse_request(body: &[u8], message: &str) -> Result<CreatePaymentRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, "{}", message);
        ApiError(AppError::BadRequest(message.into()))
    })
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::default())
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Create a payment.
#[tracing::instrument(skip(state, body))]
pub async fn create_payment<S: PaymentStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_request(&body, CREATE_PARSE_FAILED)?;
    tracing::info!(
        organisation_id = %req.organisation_id,
        "Received request to create payment"
    );

    let created = state.service.create_payment(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all payments.
#[tracing::instrument(skip(state))]
pub async fn list_payments<S: PaymentStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Received request to query all payments");
    let payments = state.service.list_payments().await?;
    Ok(Json(payments))
}

#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<S: PaymentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.get_payment(&id).await?;
    Ok(Json(payment))
}

/// Replace a payment.
#[tracing::instrument(skip(state, body), fields(payment_id = %id))]
pub async fn update_payment<S: PaymentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_request(&body, UPDATE_PARSE_FAILED)?;
    tracing::info!("Received request to update payment");

    state.service.update_payment(&id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn delete_payment<S: PaymentStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_payment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
