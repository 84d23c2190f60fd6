use std::env;

/// Provider credentials and CORS origin, read once at startup. Secrets are
/// optional on purpose: an unconfigured provider answers its webhooks with a
/// generic 500 instead of keeping the whole service from booting.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub stripe_secret: Option<String>,
    pub stripe_webhook_secret: Option<String>,
    pub paystack_secret_key: Option<String>,
    pub flw_secret_hash: Option<String>,
    pub nowpayments_ipn_secret: Option<String>,
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            stripe_secret: non_empty("STRIPE_SECRET"),
            stripe_webhook_secret: non_empty("STRIPE_WEBHOOK_SECRET"),
            paystack_secret_key: non_empty("PAYSTACK_SECRET_KEY"),
            flw_secret_hash: non_empty("FLW_SECRET_HASH"),
            nowpayments_ipn_secret: non_empty("NOWPAYMENTS_IPN_SECRET"),
            cors_origin: non_empty("CORS_ORIGIN"),
        }
    }
}

/// An empty env var counts as unset.
fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
