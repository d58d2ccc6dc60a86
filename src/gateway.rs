// src/gateway.rs
// Client for the external WhatsApp HTTP bridge. The bridge owns the actual
// session (QR pairing, reconnects); this side only probes it and posts sends.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use serde_json::json;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    Disconnected,
    Connecting,
    Ready,
}

/// Capability the dispatcher sends through. Split out so the pipeline can be
/// exercised against a recording fake.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, target: &str, text: &str) -> Result<(), GatewayError>;
}

#[derive(Clone)]
pub struct WhatsappGateway {
    client: reqwest::Client,
    base_url: String,
    enabled: bool,
    state_tx: Arc<watch::Sender<GatewayState>>,
}

impl WhatsappGateway {
    pub fn new(base_url: &str) -> Self {
        let (state_tx, _) = watch::channel(GatewayState::Disconnected);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            enabled: true,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Gateway that skips every send. Lets the service run without a bridge
    /// configured, same as the disabled publishers elsewhere in this stack.
    pub fn new_noop() -> Self {
        let (state_tx, _) = watch::channel(GatewayState::Disconnected);
        Self {
            client: reqwest::Client::new(),
            base_url: String::new(),
            enabled: false,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Probes the bridge status endpoint and publishes the resulting state.
    /// Request handling never calls this; the session is process-wide.
    pub async fn connect(&self) -> Result<(), GatewayError> {
        if !self.enabled {
            return Ok(());
        }
        self.state_tx.send_replace(GatewayState::Connecting);

        let url = format!("{}/api/status", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                self.state_tx.send_replace(GatewayState::Ready);
                Ok(())
            }
            Ok(resp) => {
                self.state_tx.send_replace(GatewayState::Disconnected);
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                Err(GatewayError::Rejected { status, body })
            }
            Err(e) => {
                self.state_tx.send_replace(GatewayState::Disconnected);
                Err(GatewayError::Http(e))
            }
        }
    }

    pub fn state(&self) -> GatewayState {
        *self.state_tx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<GatewayState> {
        self.state_tx.subscribe()
    }
}

#[async_trait]
impl MessageSender for WhatsappGateway {
    async fn send(&self, target: &str, text: &str) -> Result<(), GatewayError> {
        if !self.enabled {
            warn!("WhatsApp gateway disabled — skipping message to {}", target);
            return Ok(());
        }

        let url = format!("{}/api/send", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "to": target, "text": text }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(GatewayError::Rejected { status, body })
        }
    }
}
