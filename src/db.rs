// src/db.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NormalizedOrder, Order, OrderStatus};

/// Persistence capability used by the intake pipeline. Orders are written
/// once and never updated or deleted here.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, assigning its id and creation time.
    async fn create(&self, new: NormalizedOrder) -> Result<Order, sqlx::Error>;

    /// Any order with the same number and orders text created at or after
    /// `since`. Read path of the duplicate guard.
    async fn find_recent_match(
        &self,
        number: &str,
        orders_text: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Order>, sqlx::Error>;

    /// Total persisted orders. Diagnostic only.
    async fn count(&self) -> Result<i64, sqlx::Error>;
}

#[derive(Clone)]
pub struct OrderRepo {
    pool: PgPool,
}

impl OrderRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl OrderStore for OrderRepo {
    async fn create(&self, new: NormalizedOrder) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, customer_name, whatsapp_number, address, timing, orders, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.customer_name)
        .bind(&new.whatsapp_number)
        .bind(&new.address)
        .bind(&new.timing)
        .bind(&new.orders)
        .bind(OrderStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    async fn find_recent_match(
        &self,
        number: &str,
        orders_text: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE whatsapp_number = $1 AND orders = $2 AND created_at >= $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(number)
        .bind(orders_text)
        .bind(since)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
    }
}
