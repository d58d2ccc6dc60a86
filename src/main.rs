// src/main.rs
mod db;
mod dedup;
mod error;
mod gateway;
mod handlers;
mod models;
mod notify;
mod pipeline;
#[cfg(test)]
mod testutil;
mod validate;

use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};
use sqlx::postgres::PgPoolOptions;

use crate::db::{OrderRepo, OrderStore};
use crate::gateway::WhatsappGateway;
use crate::notify::NotificationDispatcher;
use crate::pipeline::OrderPipeline;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let owner_contact = env::var("OWNER_NUMBER").expect("OWNER_NUMBER not set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .expect("postgres");
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        eprintln!("❌ Migration failed: {:?}", e);
        std::process::exit(1);
    }

    let gateway = match env::var("WHATSAPP_GATEWAY_URL") {
        Ok(url) => {
            let gateway = WhatsappGateway::new(&url);
            if let Err(e) = gateway.connect().await {
                warn!("WhatsApp gateway not reachable yet: {} — sends may fail until it comes up", e);
            }
            gateway
        }
        Err(_) => {
            warn!("WHATSAPP_GATEWAY_URL not set — notifications are disabled");
            WhatsappGateway::new_noop()
        }
    };

    // log gateway session transitions in the background
    let mut state_rx = gateway.subscribe_state();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            info!("WhatsApp gateway state: {:?}", *state_rx.borrow());
        }
    });

    let store: Arc<dyn OrderStore> = Arc::new(OrderRepo::new(&pool));
    let dispatcher = NotificationDispatcher::new(Arc::new(gateway), owner_contact);
    let pipeline = web::Data::new(OrderPipeline::new(store.clone(), dispatcher.clone()));
    let dispatcher_data = web::Data::new(dispatcher);
    let store_data: web::Data<dyn OrderStore> = web::Data::from(store);

    println!("🚀 Order service running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            .app_data(dispatcher_data.clone())
            .app_data(store_data.clone())
            .route("/api/order", web::post().to(handlers::place_order))
            .route("/api/test", web::get().to(handlers::health_check))
            .route("/api/test-whatsapp", web::get().to(handlers::test_whatsapp))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
