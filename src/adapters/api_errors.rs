use crate::domain::error::ReconcileError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapters
/// layer. Webhook-facing variants answer with the exact bodies providers
/// expect; everything internal collapses to a generic 500 that names no
/// secret and leaks no digest.
pub struct ApiError(pub ReconcileError);

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ReconcileError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ReconcileError::StripeWebhook(msg) => {
                tracing::warn!("stripe webhook rejected: {msg}");
                (StatusCode::BAD_REQUEST, format!("Webhook Error: {msg}")).into_response()
            }
            ReconcileError::Signature(msg) => {
                tracing::warn!("webhook rejected: {msg}");
                (StatusCode::UNAUTHORIZED, "invalid signature").into_response()
            }
            ReconcileError::NotConfigured(provider) => {
                tracing::error!(provider, "webhook secret not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            ReconcileError::Database(err) => {
                tracing::error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            ReconcileError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            ReconcileError::Provider(msg) => {
                tracing::error!("provider api error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "payment provider error" })),
                )
                    .into_response()
            }
            ReconcileError::Validation(msg) => {
                tracing::error!("validation error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            ReconcileError::Conflict(msg) => {
                tracing::error!("conflict: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
