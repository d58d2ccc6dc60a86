// src/notify.rs
// Formats the owner and customer messages and pushes them through the
// gateway. Sends are sequential and never retried; a failure here bubbles
// up even though the order row already exists.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::gateway::{GatewayError, MessageSender};
use crate::models::Order;

/// Routing suffix the gateway expects on customer numbers.
pub const CUSTOMER_ROUTE_SUFFIX: &str = "c.us";

const TEST_MESSAGE: &str = "🤖 Test message from the order service. The WhatsApp gateway is working!";

#[derive(Clone)]
pub struct NotificationDispatcher {
    gateway: Arc<dyn MessageSender>,
    owner_contact: String,
}

impl NotificationDispatcher {
    pub fn new(gateway: Arc<dyn MessageSender>, owner_contact: String) -> Self {
        Self {
            gateway,
            owner_contact,
        }
    }

    pub async fn notify_owner(&self, order: &Order) -> Result<(), GatewayError> {
        let text = owner_message(order, ist_now());
        self.gateway.send(&self.owner_contact, &text).await
    }

    pub async fn notify_customer(&self, order: &Order) -> Result<(), GatewayError> {
        let text = customer_message(order);
        self.gateway
            .send(&customer_address(&order.whatsapp_number), &text)
            .await
    }

    /// Fixed diagnostic text to the owner, backing `GET /api/test-whatsapp`.
    pub async fn send_test_message(&self) -> Result<(), GatewayError> {
        self.gateway.send(&self.owner_contact, TEST_MESSAGE).await
    }
}

pub(crate) fn customer_address(number: &str) -> String {
    format!("{}@{}", number, CUSTOMER_ROUTE_SUFFIX)
}

fn owner_message(order: &Order, sent_at: DateTime<FixedOffset>) -> String {
    format!(
        "🔔 *New Order Received!*\n\n\
         👤 *Name:* {}\n\
         📱 *Phone:* +{}\n\
         📍 *Address:* {}\n\
         ⏰ *Timing:* {}\n\
         🛒 *Orders:* {}\n\
         🕐 *Time:* {}",
        order.customer_name,
        order.whatsapp_number,
        order.address,
        order.timing,
        order.orders,
        sent_at.format("%d/%m/%Y, %I:%M:%S %p"),
    )
}

fn customer_message(order: &Order) -> String {
    format!(
        "✅ *Order Confirmed!*\n\n\
         Hi {}, your order has been received.\n\n\
         🛒 *Orders:* {}\n\
         ⏰ *Timing:* {}\n\
         📍 *Address:* {}\n\n\
         Thank you for ordering with us!",
        order.customer_name, order.orders, order.timing, order.address,
    )
}

// Owner reads timestamps in IST regardless of where the box runs.
fn ist_now() -> DateTime<FixedOffset> {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range");
    Utc::now().with_timezone(&ist)
}
