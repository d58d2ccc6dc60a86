use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub whatsapp_number: String,
    pub address: String,
    pub timing: String,
    pub orders: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

/// Raw inbound payload. Absent fields deserialize to empty strings so the
/// validator reports them as missing instead of serde failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub whatsapp_number: String,
    pub address: String,
    pub timing: String,
    pub orders: String,
}

/// A request that passed validation: `whatsapp_number` is digits only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOrder {
    pub customer_name: String,
    pub whatsapp_number: String,
    pub address: String,
    pub timing: String,
    pub orders: String,
}
