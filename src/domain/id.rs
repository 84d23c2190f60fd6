use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::ReconcileError;

/// Reference a payment provider echoes back in its webhooks (`cs_xxx`,
/// a Paystack `reference`, a Flutterwave `tx_ref`, a NOWPayments
/// `payment_id`). Opaque apart from being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderRef(String);

impl ProviderRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, ReconcileError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "provider reference cannot be empty".into(),
            ));
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
