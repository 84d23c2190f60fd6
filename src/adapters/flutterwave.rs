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

#[tracing::instrument(name = "flutterwave_webhook", skip_all)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let secret = signature::require_secret(state.config.flw_secret_hash.as_deref(), "flutterwave")?;
    // Flutterwave dashboards have shipped both spellings of the header.
    let hash = headers
        .get("verif-hash")
        .or_else(|| headers.get("verif_hash"))
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ReconcileError::Signature("missing verif-hash header".into()))?;

    signature::verify_flutterwave(secret, hash)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(ReconcileError::from)?;

    let Some(event) = normalize(PaymentMethod::Flutterwave, &payload) else {
        tracing::info!(
            event = payload.get("event").and_then(|v| v.as_str()).unwrap_or("unknown"),
            "flutterwave event ignored"
        );
        return Ok("ok");
    };

    match reconcile_event(state.store.as_ref(), PaymentMethod::Flutterwave, &event).await? {
        ReconcileOutcome::Applied { order_id, new_status, .. } => {
            tracing::info!(order_id = %order_id, status = %new_status, "flutterwave webhook applied");
        }
        ReconcileOutcome::OrderNotFound => {}
    }
    Ok("ok")
}
