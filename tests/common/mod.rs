#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};
use tower::ServiceExt;
use uuid::Uuid;

use order_sync::{
    AppState, app,
    config::Config,
    domain::id::ProviderRef,
    domain::order::{NewOrder, PaymentMethod},
    infra::memory::InMemoryStore,
    infra::store::OrderStore,
};

pub const STRIPE_WEBHOOK_SECRET: &str = "whsec_test_123";
pub const PAYSTACK_SECRET: &str = "sk_test_paystack_abc";
pub const FLW_HASH: &str = "flw-secret-hash-xyz";
pub const NOWPAYMENTS_SECRET: &str = "np-ipn-secret-789";

/// Every provider configured — the default for happy-path tests.
pub fn test_config() -> Config {
    Config {
        stripe_secret: Some("sk_test_stripe_key".into()),
        stripe_webhook_secret: Some(STRIPE_WEBHOOK_SECRET.into()),
        paystack_secret_key: Some(PAYSTACK_SECRET.into()),
        flw_secret_hash: Some(FLW_HASH.into()),
        nowpayments_ipn_secret: Some(NOWPAYMENTS_SECRET.into()),
        cors_origin: None,
    }
}

/// Router over a fresh in-memory store; the store handle is returned so
/// tests can seed orders and assert on the resulting state.
pub fn make_app(config: Config) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState {
        store: store.clone(),
        config: Arc::new(config),
    };
    (app(state), store)
}

pub async fn seed_order(
    store: &InMemoryStore,
    provider_ref: &str,
    method: PaymentMethod,
) -> Uuid {
    let order = NewOrder {
        id: Uuid::now_v7(),
        payment_ref: ProviderRef::new(provider_ref).unwrap(),
        payment_method: method,
        total_amount: 5000,
        currency: "usd".into(),
    };
    store.insert_order(&order).await.unwrap();
    order.id
}

// ── Request helpers ────────────────────────────────────────────────────────

pub async fn post(
    app: &Router,
    path: &str,
    headers: &[(&str, &str)],
    body: String,
) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

// ── Signing helpers ────────────────────────────────────────────────────────

pub fn hmac_sha512_hex(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Stripe's `t=...,v1=...` scheme: HMAC-SHA256 over `"{t}.{body}"`.
pub fn stripe_signature(secret: &str, body: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.{body}").as_bytes());
    format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    )
}

// ── Stripe fixtures ────────────────────────────────────────────────────────

/// A complete checkout.session object, shaped like the real webhook payload
/// so the SDK's typed parse accepts it.
pub fn stripe_checkout_session(session_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": session_id,
        "object": "checkout.session",
        "after_expiration": null,
        "allow_promotion_codes": null,
        "amount_subtotal": 5000,
        "amount_total": 5000,
        "automatic_tax": {"enabled": false, "liability": null, "status": null},
        "billing_address_collection": null,
        "cancel_url": "https://shop.example/checkout/cancel",
        "client_reference_id": null,
        "consent": null,
        "consent_collection": null,
        "created": 1_700_000_000,
        "currency": "usd",
        "currency_conversion": null,
        "custom_fields": [],
        "custom_text": {
            "after_submit": null,
            "shipping_address": null,
            "submit": null,
            "terms_of_service_acceptance": null
        },
        "customer": null,
        "customer_creation": "if_required",
        "customer_details": null,
        "customer_email": null,
        "expires_at": 1_700_086_400,
        "invoice": null,
        "invoice_creation": null,
        "livemode": false,
        "locale": null,
        "metadata": {},
        "mode": "payment",
        "payment_intent": "pi_3OqTest000000001",
        "payment_link": null,
        "payment_method_collection": "always",
        "payment_method_configuration_details": null,
        "payment_method_options": {},
        "payment_method_types": ["card"],
        "payment_status": "paid",
        "phone_number_collection": {"enabled": false},
        "recovered_from": null,
        "setup_intent": null,
        "shipping_address_collection": null,
        "shipping_cost": null,
        "shipping_details": null,
        "shipping_options": [],
        "status": "complete",
        "submit_type": null,
        "subscription": null,
        "success_url": "https://shop.example/checkout/success",
        "total_details": {"amount_discount": 0, "amount_shipping": 0, "amount_tax": 0},
        "url": null
    })
}

pub fn stripe_event(event_type: &str, object: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "evt_1OqTest00000001",
        "object": "event",
        "api_version": null,
        "created": Utc::now().timestamp(),
        "data": {"object": object},
        "livemode": false,
        "pending_webhooks": 1,
        "request": null,
        "type": event_type
    })
}
