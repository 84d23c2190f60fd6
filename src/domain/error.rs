use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("webhook signature: {0}")]
    Signature(String),

    #[error("stripe webhook: {0}")]
    StripeWebhook(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("provider api: {0}")]
    Provider(String),

    #[error("conflict: {0}")]
    Conflict(String),
}
