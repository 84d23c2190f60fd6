use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::error::ReconcileError,
        domain::id::ProviderRef,
        domain::order::{NewOrder, PaymentMethod},
        services::{
            normalizer::normalize,
            reconcile::{ReconcileOutcome, reconcile_event},
            signature,
        },
    },
    axum::{Json, extract::State, http::HeaderMap},
    serde::Deserialize,
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

/// Prices arrive in major units from the storefront; Stripe wants minor.
fn minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn line_item(
    name: &str,
    price: f64,
    quantity: u64,
    currency: stripe::Currency,
) -> stripe::CreateCheckoutSessionLineItems {
    stripe::CreateCheckoutSessionLineItems {
        price_data: Some(stripe::CreateCheckoutSessionLineItemsPriceData {
            currency,
            product_data: Some(stripe::CreateCheckoutSessionLineItemsPriceDataProductData {
                name: name.to_string(),
                ..Default::default()
            }),
            unit_amount: Some(minor_units(price)),
            ..Default::default()
        }),
        quantity: Some(quantity),
        ..Default::default()
    }
}

#[tracing::instrument(name = "create_checkout", skip_all)]
pub async fn create_checkout_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateCheckoutRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let total = req
        .total_amount
        .ok_or_else(|| ReconcileError::BadRequest("totalAmount is required".into()))?;
    if !total.is_finite() || total <= 0.0 {
        return Err(
            ReconcileError::BadRequest("totalAmount must be a positive number".into()).into(),
        );
    }

    let secret = signature::require_secret(state.config.stripe_secret.as_deref(), "stripe")?;

    let currency_code = req.currency.as_deref().unwrap_or("usd").to_lowercase();
    let currency: stripe::Currency =
        serde_json::from_value(serde_json::Value::String(currency_code.clone()))
            .map_err(|_| ReconcileError::BadRequest(format!("unsupported currency: {currency_code}")))?;

    let origin = state
        .config
        .cors_origin
        .clone()
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let success_url = format!("{origin}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}");
    let cancel_url = format!("{origin}/checkout/cancel");

    let line_items: Vec<stripe::CreateCheckoutSessionLineItems> = if req.items.is_empty() {
        vec![line_item("Order", total, 1, currency)]
    } else {
        req.items
            .iter()
            .map(|it| line_item(&it.name, it.price, it.quantity, currency))
            .collect()
    };

    let mut params = stripe::CreateCheckoutSession::new();
    params.mode = Some(stripe::CheckoutSessionMode::Payment);
    params.line_items = Some(line_items);
    params.success_url = Some(&success_url);
    params.cancel_url = Some(&cancel_url);

    let client = stripe::Client::new(secret);
    let session = stripe::CheckoutSession::create(&client, params)
        .await
        .map_err(|e| ReconcileError::Provider(format!("stripe checkout: {e}")))?;

    // The session id is what the webhook will echo back; the order is born
    // pending and waits for `checkout.session.completed`.
    let order = NewOrder {
        id: Uuid::now_v7(),
        payment_ref: ProviderRef::new(session.id.to_string())?,
        payment_method: PaymentMethod::Stripe,
        total_amount: minor_units(total),
        currency: currency_code,
    };
    state.store.insert_order(&order).await?;

    tracing::info!(order_id = %order.id, session_id = %session.id, "checkout session created");
    Ok(Json(serde_json::json!({
        "id": session.id.to_string(),
        "url": session.url.as_deref().unwrap_or_default(),
    })))
}

#[tracing::instrument(
    name = "stripe_webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<&'static str, ApiError> {
    let secret =
        signature::require_secret(state.config.stripe_webhook_secret.as_deref(), "stripe")?;
    let sig = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ReconcileError::StripeWebhook("missing stripe-signature header".into()))?;

    // The SDK parses while it verifies; both failure kinds answer 400.
    let event = stripe::Webhook::construct_event(&body, sig, secret)
        .map_err(|e| ReconcileError::StripeWebhook(e.to_string()))?;

    let raw_event: serde_json::Value =
        serde_json::from_str(&body).map_err(ReconcileError::from)?;

    // Add event context to the span so all subsequent logs are correlated.
    tracing::Span::current()
        .record("event_id", tracing::field::display(&event.id))
        .record("event_type", tracing::field::display(&event.type_));

    let Some(normalized) = normalize(PaymentMethod::Stripe, &raw_event) else {
        tracing::info!(event_type = %event.type_, "stripe event ignored");
        return Ok("ok");
    };

    match reconcile_event(state.store.as_ref(), PaymentMethod::Stripe, &normalized).await? {
        ReconcileOutcome::Applied { order_id, new_status, .. } => {
            tracing::info!(order_id = %order_id, status = %new_status, "stripe webhook applied");
        }
        ReconcileOutcome::OrderNotFound => {}
    }
    Ok("ok")
}
