//! Hash-map `OrderStore` with the same CAS semantics as the Postgres store.
//! Backs the integration tests; also usable by embedders that don't want a
//! database.

use {
    crate::domain::error::ReconcileError,
    crate::domain::order::{NewOrder, Order, PaymentMethod, StatusTransition},
    crate::infra::store::{AppendOutcome, OrderStore, StoreFuture},
    chrono::{DateTime, Utc},
    std::collections::HashMap,
    std::sync::Mutex,
    uuid::Uuid,
};

#[derive(Default)]
pub struct InMemoryStore {
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one order, for assertions.
    pub fn get(&self, id: Uuid) -> Option<Order> {
        self.orders.lock().expect("store lock poisoned").get(&id).cloned()
    }
}

impl OrderStore for InMemoryStore {
    fn insert_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, ()> {
        let order = order.clone();
        Box::pin(async move {
            let materialized = order.into_order();
            self.orders
                .lock()
                .expect("store lock poisoned")
                .insert(materialized.id, materialized);
            Ok(())
        })
    }

    fn find_by_reference<'a>(
        &'a self,
        provider_ref: &'a str,
        method: PaymentMethod,
    ) -> StoreFuture<'a, Option<Order>> {
        Box::pin(async move {
            let orders = self.orders.lock().expect("store lock poisoned");
            Ok(orders
                .values()
                .find(|o| o.payment_ref.as_str() == provider_ref && o.payment_method == method)
                .cloned())
        })
    }

    fn append_transition<'a>(
        &'a self,
        order_id: Uuid,
        transition: &'a StatusTransition,
        expected_updated_at: DateTime<Utc>,
    ) -> StoreFuture<'a, AppendOutcome> {
        Box::pin(async move {
            let mut orders = self.orders.lock().expect("store lock poisoned");
            let order = orders.get_mut(&order_id).ok_or_else(|| {
                ReconcileError::Conflict(format!("order {order_id} vanished mid-update"))
            })?;

            if order.updated_at != expected_updated_at {
                return Ok(AppendOutcome::Conflict);
            }

            order.payment_status = transition.status.clone();
            order.timeline.push(transition.entry.clone());
            if let Some(meta) = &transition.provider_meta {
                order.payment_meta.push(meta.clone());
            }
            order.updated_at = Utc::now();
            Ok(AppendOutcome::Applied)
        })
    }
}
