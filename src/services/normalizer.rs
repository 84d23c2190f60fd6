//! Maps each provider's webhook payload shape onto the canonical
//! `NormalizedEvent`. Pure functions over `serde_json::Value` so the whole
//! extraction table is unit-testable without HTTP or provider SDK types.
//!
//! `None` always means "acknowledge with 200 and do nothing": an event type
//! the system doesn't react to, or a payload with no usable reference.

use {
    crate::domain::event::NormalizedEvent,
    crate::domain::id::ProviderRef,
    crate::domain::order::{PaymentMethod, PaymentStatus},
    serde_json::Value,
};

pub fn normalize(method: PaymentMethod, payload: &Value) -> Option<NormalizedEvent> {
    match method {
        PaymentMethod::Stripe => normalize_stripe(payload),
        PaymentMethod::Paystack => normalize_paystack(payload),
        PaymentMethod::Flutterwave => normalize_flutterwave(payload),
        PaymentMethod::Crypto => normalize_nowpayments(payload),
    }
}

fn build(reference: &str, status: PaymentStatus, provider_event: &str) -> Option<NormalizedEvent> {
    let provider_ref = ProviderRef::new(reference).ok()?;
    Some(NormalizedEvent {
        provider_ref,
        status,
        provider_event: provider_event.to_string(),
    })
}

/// `payment_intent` arrives either as a bare id string or as an expanded
/// object carrying its own `id`.
fn expandable_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str),
        _ => None,
    }
}

fn normalize_stripe(payload: &Value) -> Option<NormalizedEvent> {
    let event_type = payload.get("type")?.as_str()?;
    let object = payload.pointer("/data/object")?;
    match event_type {
        "checkout.session.completed" => {
            let id = object.get("id")?.as_str()?;
            build(id, PaymentStatus::Paid, event_type)
        }
        "charge.refunded" => {
            let pi = object.get("payment_intent").and_then(expandable_id)?;
            build(pi, PaymentStatus::Refunded, event_type)
        }
        "payment_intent.canceled" => {
            let id = object.get("id")?.as_str()?;
            build(id, PaymentStatus::Cancelled, event_type)
        }
        _ => None,
    }
}

fn normalize_paystack(payload: &Value) -> Option<NormalizedEvent> {
    let event = payload.get("event")?.as_str()?;
    let status = match event {
        "charge.success" => PaymentStatus::Paid,
        "refund.processed" => PaymentStatus::Refunded,
        "charge.failed" => PaymentStatus::Cancelled,
        _ => return None,
    };
    let reference = payload
        .pointer("/data/reference")
        .or_else(|| payload.pointer("/data/ref"))?
        .as_str()?;
    build(reference, status, event)
}

fn normalize_flutterwave(payload: &Value) -> Option<NormalizedEvent> {
    let event = payload.get("event")?.as_str()?;
    let status = match event {
        // Flutterwave fires charge.completed for failed charges too; only a
        // successful one is a paid signal.
        "charge.completed" => {
            let charge_status = payload.pointer("/data/status").and_then(Value::as_str);
            if charge_status != Some("successful") {
                return None;
            }
            PaymentStatus::Paid
        }
        "refund.completed" => PaymentStatus::Refunded,
        "charge.failed" => PaymentStatus::Cancelled,
        _ => return None,
    };
    let reference = payload
        .pointer("/data/tx_ref")
        .or_else(|| payload.pointer("/data/txRef"))?
        .as_str()?;
    build(reference, status, event)
}

fn normalize_nowpayments(payload: &Value) -> Option<NormalizedEvent> {
    let payment_status = payload.get("payment_status")?.as_str()?;
    let status = match payment_status {
        "finished" => PaymentStatus::Paid,
        "refunded" => PaymentStatus::Refunded,
        "failed" | "expired" => PaymentStatus::Cancelled,
        _ => return None,
    };
    // payment_id is numeric in NOWPayments IPN bodies, but tolerate strings.
    let reference = match payload.get("payment_id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    build(&reference, status, payment_status)
}
