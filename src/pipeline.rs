use std::sync::Arc;

use chrono::Utc;
use log::{error, info};

use crate::db::OrderStore;
use crate::dedup::is_duplicate;
use crate::error::OrderError;
use crate::models::{Order, OrderRequest};
use crate::notify::NotificationDispatcher;
use crate::validate::validate;

/// Runs one submission through validate → duplicate check → persist →
/// notify owner → notify customer. Stateless between requests; the store and
/// gateway behind it are the only shared resources.
pub struct OrderPipeline {
    store: Arc<dyn OrderStore>,
    dispatcher: NotificationDispatcher,
}

impl OrderPipeline {
    pub fn new(store: Arc<dyn OrderStore>, dispatcher: NotificationDispatcher) -> Self {
        Self { store, dispatcher }
    }

    pub async fn place_order(&self, req: &OrderRequest) -> Result<Order, OrderError> {
        let normalized = validate(req)?;

        if is_duplicate(
            self.store.as_ref(),
            &normalized.whatsapp_number,
            &normalized.orders,
            Utc::now(),
        )
        .await?
        {
            return Err(OrderError::DuplicateOrder);
        }

        let order = self.store.create(normalized).await?;
        info!("Order {} stored for +{}", order.id, order.whatsapp_number);

        // Owner first, then customer. No rollback of the stored order if a
        // send fails: the request fails while the row stays.
        if let Err(e) = self.dispatcher.notify_owner(&order).await {
            error!("Owner notification failed for stored order {}: {}", order.id, e);
            return Err(OrderError::Notify(e));
        }
        if let Err(e) = self.dispatcher.notify_customer(&order).await {
            error!("Customer notification failed for stored order {}: {}", order.id, e);
            return Err(OrderError::Notify(e));
        }

        Ok(order)
    }
}
