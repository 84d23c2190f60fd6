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

#[tracing::instrument(name = "nowpayments_webhook", skip_all)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let secret =
        signature::require_secret(state.config.nowpayments_ipn_secret.as_deref(), "nowpayments")?;
    let sig = headers
        .get("x-nowpayments-sig")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ReconcileError::Signature("missing x-nowpayments-sig header".into()))?;

    signature::verify_nowpayments(secret, &body, sig)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(ReconcileError::from)?;

    let Some(event) = normalize(PaymentMethod::Crypto, &payload) else {
        tracing::info!(
            payment_status = payload
                .get("payment_status")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown"),
            "nowpayments ipn ignored"
        );
        return Ok("ok");
    };

    match reconcile_event(state.store.as_ref(), PaymentMethod::Crypto, &event).await? {
        ReconcileOutcome::Applied { order_id, new_status, .. } => {
            tracing::info!(order_id = %order_id, status = %new_status, "nowpayments ipn applied");
        }
        ReconcileOutcome::OrderNotFound => {}
    }
    Ok("ok")
}
