//! Wallet connection: account access, session tracking and network switching.

use std::sync::Arc;

use portgenie_providers::eth_provider::{
    error::ProviderError, request_as, Eip1193Provider, ProviderEvent, ETH_ACCOUNTS,
    ETH_CHAIN_ID, ETH_REQUEST_ACCOUNTS, WALLET_ADD_ETHEREUM_CHAIN,
    WALLET_SWITCH_ETHEREUM_CHAIN,
};
use portgenie_providers::network::{parse_chain_id, Network};
use serde_json::json;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    model::{network_name, WalletEvent, WalletSession},
    service::error::WalletServiceError,
};

pub const WALLET_INSTALL_URL: &str = "https://metamask.io/download/";

pub struct WalletService {
    provider: Option<Arc<dyn Eip1193Provider>>,
}

impl WalletService {
    pub fn new(provider: Option<Arc<dyn Eip1193Provider>>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> Result<&dyn Eip1193Provider, WalletServiceError> {
        self.provider
            .as_deref()
            .ok_or(WalletServiceError::ProviderNotFound {
                install_url: WALLET_INSTALL_URL,
            })
    }

    /// Requests account access, which may prompt the user.
    ///
    /// The returned connection follows account and chain changes for as long
    /// as it is kept.
    pub async fn connect(&self) -> Result<WalletConnection, WalletServiceError> {
        let provider = self.provider()?;
        let events = provider.subscribe();

        let accounts: Vec<String> = request_as(provider, ETH_REQUEST_ACCOUNTS, json!([]))
            .await
            .map_err(|e| {
                tracing::warn!("wallet connection failed: {e}");
                map_request_error(e)
            })?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or(WalletServiceError::NoAccounts)?;

        let chain_id = read_chain_id(provider).await?;
        tracing::info!(%address, chain_id, "wallet connected");

        Ok(WalletConnection {
            address: Some(address),
            chain_id,
            events,
        })
    }

    /// Session of an already authorised wallet, without prompting the user.
    pub async fn current_session(&self) -> Result<Option<WalletSession>, WalletServiceError> {
        let provider = self.provider()?;

        let accounts: Vec<String> = request_as(provider, ETH_ACCOUNTS, json!([])).await?;
        let Some(address) = accounts.into_iter().next() else {
            return Ok(None);
        };

        let chain_id = read_chain_id(provider).await?;
        Ok(Some(WalletSession::new(address, chain_id)))
    }

    /// Switches the wallet to `network`, adding the chain first when the wallet
    /// does not know it and its parameters are available.
    pub async fn switch_network(&self, network: Network) -> Result<(), WalletServiceError> {
        let provider = self.provider()?;
        let chain_id = network.hex_chain_id();

        let switched = provider
            .request(
                WALLET_SWITCH_ETHEREUM_CHAIN,
                json!([{ "chainId": chain_id }]),
            )
            .await;

        match switched {
            Ok(_) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => {
                let Some(params) = network.add_chain_params() else {
                    return Err(map_request_error(e));
                };

                tracing::info!(%network, "adding chain to wallet");
                provider
                    .request(WALLET_ADD_ETHEREUM_CHAIN, json!([params]))
                    .await
                    .map_err(map_request_error)?;
                Ok(())
            }
            Err(e) => Err(map_request_error(e)),
        }
    }
}

/// A connected wallet session, updated from wallet notifications.
pub struct WalletConnection {
    address: Option<String>,
    chain_id: u64,
    events: broadcast::Receiver<ProviderEvent>,
}

impl WalletConnection {
    /// `None` after the wallet disconnected.
    pub fn session(&self) -> Option<WalletSession> {
        self.address
            .clone()
            .map(|address| WalletSession::new(address, self.chain_id))
    }

    /// Waits for the next session change. `None` once the provider is gone.
    pub async fn next_event(&mut self) -> Option<WalletEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) => {
                    if let Some(event) = self.apply(event) {
                        return Some(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "missed wallet notifications");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn apply(&mut self, event: ProviderEvent) -> Option<WalletEvent> {
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                Some(address) => {
                    self.address = Some(address.clone());
                    Some(WalletEvent::AccountChanged { address })
                }
                None => {
                    self.address = None;
                    Some(WalletEvent::Disconnected)
                }
            },
            ProviderEvent::ChainChanged(value) => {
                let Some(chain_id) = parse_chain_id(&value) else {
                    tracing::warn!(%value, "ignoring malformed chain id");
                    return None;
                };

                self.chain_id = chain_id;
                Some(WalletEvent::ChainChanged {
                    chain_id: chain_id.to_string(),
                    network: network_name(chain_id),
                })
            }
        }
    }
}

async fn read_chain_id(provider: &dyn Eip1193Provider) -> Result<u64, WalletServiceError> {
    let value: String = request_as(provider, ETH_CHAIN_ID, json!([])).await?;
    parse_chain_id(&value).ok_or(WalletServiceError::InvalidChainId(value))
}

fn map_request_error(error: ProviderError) -> WalletServiceError {
    if error.is_user_rejected() {
        WalletServiceError::UserRejected
    } else {
        WalletServiceError::Provider(error)
    }
}
