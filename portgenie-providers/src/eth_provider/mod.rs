//! EIP-1193 Ethereum provider abstraction.
//!
//! A provider is the single channel through which the workflow talks to a
//! wallet or node: JSON-RPC style requests plus the `accountsChanged` and
//! `chainChanged` notifications pushed by the wallet.

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use crate::eth_provider::error::ProviderError;

pub mod error;
pub mod imp;

pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";

/// Notification pushed by the wallet outside of any request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New list of authorised accounts; empty when the wallet disconnected.
    AccountsChanged(Vec<String>),
    /// New chain id, hex encoded (`0x89`).
    ChainChanged(String),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait Eip1193Provider: Send + Sync {
    /// Performs a single JSON-RPC request and returns the raw `result`.
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Subscribes to wallet notifications for as long as the receiver lives.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

/// Performs a request and deserializes its result.
pub async fn request_as<T: DeserializeOwned>(
    provider: &dyn Eip1193Provider,
    method: &str,
    params: serde_json::Value,
) -> Result<T, ProviderError> {
    let value = provider.request(method, params).await?;
    serde_json::from_value(value).map_err(|e| ProviderError::InvalidResponse {
        method: method.to_owned(),
        reason: e.to_string(),
    })
}
