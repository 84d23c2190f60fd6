use {
    crate::domain::error::ReconcileError,
    crate::domain::order::{NewOrder, Order, PaymentMethod, StatusTransition},
    chrono::{DateTime, Utc},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

pub type StoreFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ReconcileError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Status written, timeline entry appended.
    Applied,
    /// `updated_at` moved since the order was read — caller re-reads and retries.
    Conflict,
}

/// Persistence seam for the reconciliation core. Handlers receive an
/// implementation at construction time; nothing in the core touches a
/// concrete database client directly.
pub trait OrderStore: Send + Sync {
    /// Insert a freshly created (pending) order at checkout time.
    fn insert_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, ()>;

    /// Single match on `(payment_ref, payment_method)`, first row wins.
    fn find_by_reference<'a>(
        &'a self,
        provider_ref: &'a str,
        method: PaymentMethod,
    ) -> StoreFuture<'a, Option<Order>>;

    /// Apply a status transition guarded by a compare-and-swap on
    /// `expected_updated_at`. Appends to `timeline` (and `payment_meta` when
    /// the transition carries a blob) — never rewrites either sequence.
    fn append_transition<'a>(
        &'a self,
        order_id: Uuid,
        transition: &'a StatusTransition,
        expected_updated_at: DateTime<Utc>,
    ) -> StoreFuture<'a, AppendOutcome>;
}
