use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::error::ReconcileError,
        domain::order::PaymentMethod,
        services::{
            normalizer::normalize,
            reconcile::{ReconcileOutcome, reconcile_event},
            signature,
        },
    },
    axum::{body::Bytes, extract::State, http::HeaderMap},
};

#[tracing::instrument(name = "paystack_webhook", skip_all)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let secret =
        signature::require_secret(state.config.paystack_secret_key.as_deref(), "paystack")?;
    let sig = headers
        .get("x-paystack-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ReconcileError::Signature("missing x-paystack-signature header".into()))?;

    signature::verify_paystack(secret, &body, sig)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(ReconcileError::from)?;

    let Some(event) = normalize(PaymentMethod::Paystack, &payload) else {
        tracing::info!(
            event = payload.get("event").and_then(|v| v.as_str()).unwrap_or("unknown"),
            "paystack event ignored"
        );
        return Ok("ok");
    };

    match reconcile_event(state.store.as_ref(), PaymentMethod::Paystack, &event).await? {
        ReconcileOutcome::Applied { order_id, new_status, .. } => {
            tracing::info!(order_id = %order_id, status = %new_status, "paystack webhook applied");
        }
        ReconcileOutcome::OrderNotFound => {}
    }
    Ok("ok")
}
