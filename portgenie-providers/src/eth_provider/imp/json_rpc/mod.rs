//! EIP-1193 provider over HTTP JSON-RPC 2.0.
//!
//! Serves as the non-signing read connection and, against a node that manages
//! its own accounts, as the signing wallet. HTTP cannot carry push
//! notifications, so wallet events are forwarded by the embedding host through
//! [`JsonRpcProvider::event_sender`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{
    eth_provider::{error::ProviderError, Eip1193Provider, ProviderEvent},
    http_client::HttpClient,
};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct Params {
    pub rpc_url: String,
}

pub struct JsonRpcProvider {
    params: Params,
    client: Arc<dyn HttpClient>,
    next_id: AtomicU64,
    events: broadcast::Sender<ProviderEvent>,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

impl JsonRpcProvider {
    pub fn new(params: Params, client: Arc<dyn HttpClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            params,
            client,
            next_id: AtomicU64::new(1),
            events,
        }
    }

    /// Sender used by the host to forward `accountsChanged`/`chainChanged`.
    pub fn event_sender(&self) -> broadcast::Sender<ProviderEvent> {
        self.events.clone()
    }
}

#[async_trait::async_trait]
impl Eip1193Provider for JsonRpcProvider {
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::debug!(method, id = request.id, "JSON-RPC request");

        let response: JsonRpcResponse = self
            .client
            .post(&self.params.rpc_url)
            .json(&request)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        match (response.error, response.result) {
            (Some(error), _) => Err(ProviderError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (None, Some(result)) => Ok(result),
            // `null` results (pending receipts) deserialize to `None`
            (None, None) => Ok(serde_json::Value::Null),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}
