// In-memory stand-ins for the store and the gateway, shared by the pipeline
// and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::OrderStore;
use crate::gateway::{GatewayError, MessageSender};
use crate::models::{NormalizedOrder, Order, OrderRequest, OrderStatus};

pub fn request() -> OrderRequest {
    OrderRequest {
        customer_name: "Asha".into(),
        whatsapp_number: "91 9876543210".into(),
        address: "12 MG Road".into(),
        timing: "7pm".into(),
        orders: "2x Pizza".into(),
    }
}

#[derive(Default)]
pub struct MemStore {
    pub orders: Mutex<Vec<Order>>,
    fail_create: bool,
}

impl MemStore {
    pub fn failing() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            fail_create: true,
        }
    }

    /// Rewrites an order's creation time so window-boundary cases can be
    /// tested without sleeping.
    pub fn backdate(&self, id: Uuid, created_at: DateTime<Utc>) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == id) {
            order.created_at = created_at;
        }
    }
}

#[async_trait]
impl OrderStore for MemStore {
    async fn create(&self, new: NormalizedOrder) -> Result<Order, sqlx::Error> {
        if self.fail_create {
            return Err(sqlx::Error::PoolClosed);
        }
        let order = Order {
            id: Uuid::new_v4(),
            customer_name: new.customer_name,
            whatsapp_number: new.whatsapp_number,
            address: new.address,
            timing: new.timing,
            orders: new.orders,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_recent_match(
        &self,
        number: &str,
        orders_text: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<Order>, sqlx::Error> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| {
                o.whatsapp_number == number && o.orders == orders_text && o.created_at >= since
            })
            .cloned())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.orders.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, target: &str, text: &str) -> Result<(), GatewayError> {
        if self.fail {
            return Err(GatewayError::Rejected {
                status: 503,
                body: "gateway offline".into(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.to_string(), text.to_string()));
        Ok(())
    }
}
