use {
    crate::domain::error::ReconcileError,
    crate::domain::id::ProviderRef,
    crate::domain::order::{NewOrder, Order, PaymentMethod, PaymentStatus, StatusTransition, TimelineEntry},
    crate::infra::store::{AppendOutcome, OrderStore, StoreFuture},
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    payment_ref: String,
    payment_method: String,
    payment_status: String,
    total_amount: i64,
    currency: String,
    payment_meta: serde_json::Value,
    timeline: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, ReconcileError> {
        let timeline: Vec<TimelineEntry> = serde_json::from_value(self.timeline)?;
        let payment_meta: Vec<serde_json::Value> = serde_json::from_value(self.payment_meta)?;
        Ok(Order {
            id: self.id,
            payment_ref: ProviderRef::new(self.payment_ref)?,
            payment_method: PaymentMethod::try_from(self.payment_method.as_str())?,
            payment_status: PaymentStatus::try_from(self.payment_status.as_str())?,
            total_amount: self.total_amount,
            currency: self.currency,
            payment_meta,
            timeline,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderStore for PgOrderStore {
    fn insert_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, ()> {
        let order = order.clone();
        Box::pin(async move {
            let order = order.into_order();
            let timeline = serde_json::to_value(&order.timeline)?;
            sqlx::query(
                r#"
                INSERT INTO orders
                    (id, payment_ref, payment_method, payment_status,
                     total_amount, currency, payment_meta, timeline,
                     created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(order.id)
            .bind(order.payment_ref.as_str())
            .bind(order.payment_method.as_str())
            .bind(order.payment_status.as_str())
            .bind(order.total_amount)
            .bind(&order.currency)
            .bind(serde_json::Value::Array(order.payment_meta.clone()))
            .bind(timeline)
            .bind(order.created_at)
            .bind(order.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        })
    }

    fn find_by_reference<'a>(
        &'a self,
        provider_ref: &'a str,
        method: PaymentMethod,
    ) -> StoreFuture<'a, Option<Order>> {
        Box::pin(async move {
            let row: Option<OrderRow> = sqlx::query_as(
                r#"
                SELECT id, payment_ref, payment_method, payment_status,
                       total_amount, currency, payment_meta, timeline,
                       created_at, updated_at
                FROM orders
                WHERE payment_ref = $1 AND payment_method = $2
                LIMIT 1
                "#,
            )
            .bind(provider_ref)
            .bind(method.as_str())
            .fetch_optional(&self.pool)
            .await?;

            row.map(OrderRow::into_order).transpose()
        })
    }

    fn append_transition<'a>(
        &'a self,
        order_id: Uuid,
        transition: &'a StatusTransition,
        expected_updated_at: DateTime<Utc>,
    ) -> StoreFuture<'a, AppendOutcome> {
        Box::pin(async move {
            let entry = serde_json::to_value(&transition.entry)?;
            // The WHERE clause is the optimistic lock: a concurrent webhook
            // that committed first bumped updated_at, so this matches zero
            // rows and the caller retries against fresh state.
            let result = sqlx::query(
                r#"
                UPDATE orders
                SET payment_status = $2,
                    timeline = timeline || jsonb_build_array($3::jsonb),
                    payment_meta = CASE
                        WHEN $4::jsonb IS NULL THEN payment_meta
                        ELSE payment_meta || jsonb_build_array($4::jsonb)
                    END,
                    updated_at = now()
                WHERE id = $1 AND updated_at = $5
                "#,
            )
            .bind(order_id)
            .bind(transition.status.as_str())
            .bind(entry)
            .bind(transition.provider_meta.clone())
            .bind(expected_updated_at)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                Ok(AppendOutcome::Conflict)
            } else {
                Ok(AppendOutcome::Applied)
            }
        })
    }
}
