use super::id::ProviderRef;
use super::order::PaymentStatus;

/// What the normalizer distills out of a provider webhook: which order the
/// event is about, the canonical status it maps to, and the provider's own
/// event-type string (kept for the audit trail).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub provider_ref: ProviderRef,
    pub status: PaymentStatus,
    pub provider_event: String,
}
