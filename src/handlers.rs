use std::time::Duration;

use actix_web::{web, HttpResponse};
use log::{error, info};
use serde_json::json;

use crate::db::OrderStore;
use crate::error::OrderError;
use crate::models::OrderRequest;
use crate::notify::NotificationDispatcher;
use crate::pipeline::OrderPipeline;

/// Per-request ceiling on the pipeline. Elapsing maps to a 500 and leaves any
/// already-completed side effects (a stored order, a sent message) in place.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn place_order(
    pipeline: web::Data<OrderPipeline>,
    payload: web::Json<OrderRequest>,
) -> HttpResponse {
    let result = match tokio::time::timeout(REQUEST_TIMEOUT, pipeline.place_order(&payload)).await
    {
        Ok(result) => result,
        Err(_) => Err(OrderError::Timeout),
    };

    match result {
        Ok(order) => {
            info!("Order {} placed by {}", order.id, order.customer_name);
            HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Order placed successfully! Check WhatsApp for confirmation."
            }))
        }
        Err(e) if e.is_client_error() => HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": e.client_message()
        })),
        Err(e) => {
            error!("Error placing order: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error placing order. Please try again.",
                "error": e.to_string()
            }))
        }
    }
}

pub async fn health_check(store: web::Data<dyn OrderStore>) -> HttpResponse {
    match store.count().await {
        Ok(total) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Server is running!",
            "database": "Connected to PostgreSQL",
            "totalOrders": total
        })),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database connection failed",
                "error": e.to_string()
            }))
        }
    }
}

pub async fn test_whatsapp(dispatcher: web::Data<NotificationDispatcher>) -> HttpResponse {
    match dispatcher.send_test_message().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Test message sent to owner!"
        })),
        Err(e) => {
            error!("Test message failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to send test message.",
                "error": e.to_string()
            }))
        }
    }
}
