//! Webhook authentication for the HMAC/shared-secret providers.
//!
//! Stripe is deliberately absent: its SDK fuses parsing with verification
//! (`stripe::Webhook::construct_event` in the adapter). The providers here
//! split into two models — Paystack and NOWPayments sign the exact payload
//! (HMAC-SHA512 hex digest), Flutterwave only proves it knows a static
//! shared secret. The asymmetry is kept explicit rather than unified.

use {
    crate::domain::error::ReconcileError,
    hmac::{Hmac, Mac},
    sha2::Sha512,
    subtle::ConstantTimeEq,
};

type HmacSha512 = Hmac<Sha512>;

/// Missing or empty secret means the provider is not configured — a 500,
/// distinct from a signature mismatch (401). Never logs the secret.
pub fn require_secret<'a>(
    secret: Option<&'a str>,
    provider: &'static str,
) -> Result<&'a str, ReconcileError> {
    secret
        .filter(|s| !s.is_empty())
        .ok_or(ReconcileError::NotConfigured(provider))
}

fn hmac_sha512_hex(secret: &str, raw_body: &[u8]) -> Result<String, ReconcileError> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|_| ReconcileError::Signature("unusable hmac key".into()))?;
    mac.update(raw_body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// `x-paystack-signature`: HMAC-SHA512 hex digest of the raw body.
pub fn verify_paystack(
    secret: &str,
    raw_body: &[u8],
    header: &str,
) -> Result<(), ReconcileError> {
    let expected = hmac_sha512_hex(secret, raw_body)?;
    if constant_time_eq(&expected, header) {
        Ok(())
    } else {
        Err(ReconcileError::Signature("paystack digest mismatch".into()))
    }
}

/// `x-nowpayments-sig`: HMAC-SHA512 hex digest of the raw body (IPN secret).
pub fn verify_nowpayments(
    secret: &str,
    raw_body: &[u8],
    header: &str,
) -> Result<(), ReconcileError> {
    let expected = hmac_sha512_hex(secret, raw_body)?;
    if constant_time_eq(&expected, header) {
        Ok(())
    } else {
        Err(ReconcileError::Signature(
            "nowpayments digest mismatch".into(),
        ))
    }
}

/// `verif-hash`: Flutterwave sends the pre-shared secret itself, not a
/// payload-bound signature.
pub fn verify_flutterwave(secret: &str, header: &str) -> Result<(), ReconcileError> {
    if constant_time_eq(secret, header) {
        Ok(())
    } else {
        Err(ReconcileError::Signature(
            "flutterwave hash mismatch".into(),
        ))
    }
}
