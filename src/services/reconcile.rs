//! Order Locator + Status Transition Applier: turns a normalized webhook
//! event into an order mutation with an appended timeline entry.

use {
    crate::domain::error::ReconcileError,
    crate::domain::event::NormalizedEvent,
    crate::domain::order::{PaymentMethod, PaymentStatus, StatusTransition},
    crate::infra::store::{AppendOutcome, OrderStore},
    uuid::Uuid,
};

/// Concurrent webhooks for the same order race on the append; the CAS on
/// `updated_at` detects the loser, which re-reads and retries. With the
/// small per-order fan-in providers produce, a handful of attempts is ample.
const MAX_CAS_ATTEMPTS: u32 = 8;

#[derive(Debug)]
pub enum ReconcileOutcome {
    /// Transition applied and timeline entry appended.
    Applied {
        order_id: Uuid,
        old_status: PaymentStatus,
        new_status: PaymentStatus,
    },
    /// No order matches the reference — benign (stale or test webhook).
    OrderNotFound,
}

pub async fn reconcile_event(
    store: &dyn OrderStore,
    method: PaymentMethod,
    event: &NormalizedEvent,
) -> Result<ReconcileOutcome, ReconcileError> {
    for attempt in 0..MAX_CAS_ATTEMPTS {
        let Some(order) = store
            .find_by_reference(event.provider_ref.as_str(), method)
            .await?
        else {
            tracing::warn!(
                provider_ref = %event.provider_ref,
                method = %method,
                provider_event = %event.provider_event,
                "no order for webhook reference"
            );
            return Ok(ReconcileOutcome::OrderNotFound);
        };

        let old_status = order.payment_status.clone();

        // Last-write-wins, deliberately: any status overwrites any prior
        // status, and replayed events append duplicate entries. A regression
        // down the lifecycle is only worth a warning.
        if event.status.rank() < old_status.rank() {
            tracing::warn!(
                order_id = %order.id,
                from = %old_status,
                to = %event.status,
                provider_event = %event.provider_event,
                "regressive status transition applied"
            );
        }

        let mut meta = serde_json::Map::new();
        meta.insert(
            "providerEvent".to_string(),
            serde_json::Value::String(event.provider_event.clone()),
        );
        let transition = StatusTransition::new(event.status.clone(), method, meta);

        match store
            .append_transition(order.id, &transition, order.updated_at)
            .await?
        {
            AppendOutcome::Applied => {
                tracing::info!(
                    order_id = %order.id,
                    from = %old_status,
                    to = %event.status,
                    provider_event = %event.provider_event,
                    "order status reconciled"
                );
                return Ok(ReconcileOutcome::Applied {
                    order_id: order.id,
                    old_status,
                    new_status: event.status.clone(),
                });
            }
            AppendOutcome::Conflict => {
                tracing::debug!(
                    order_id = %order.id,
                    attempt,
                    "concurrent order update, retrying"
                );
            }
        }
    }

    Err(ReconcileError::Conflict(format!(
        "gave up after {MAX_CAS_ATTEMPTS} concurrent-update retries for {}",
        event.provider_ref
    )))
}
