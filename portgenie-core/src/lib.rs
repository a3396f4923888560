//! **PortGenie core** orchestrates the credential workflow: a wallet is
//! connected, metadata describing a portfolio, resume or certificate is
//! pinned to IPFS, an NFT is minted for it and the outcome is recorded.
//! Minted credentials can be re-verified against the chain at any time.
//!
//! ## Repository structure
//!
//! * **Providers**: the external collaborators behind traits
//!   * EIP-1193 wallet / JSON-RPC provider
//!   * Certificate NFT contract binding
//!   * IPFS pinning (Pinata)
//!   * Credential storage (in-memory, Supabase PostgREST)
//!   * Network catalogue and block explorer links
//! * **Core**: services composing the providers into the workflow
//!
//! ## Getting started
//!
//! ```ignore rust
//! let core = PortGenieCore::new(
//!     Some(PortGenieConfig::from_env()?),
//!     Arc::new(ReqwestClient::default()),
//!     Some(wallet),
//! );
//!
//! let connection = core.wallet_service.connect().await?;
//! let session = connection.session().ok_or("disconnected")?;
//! let minted = core
//!     .mint_service
//!     .mint(user_id, &session, entity_id, &entity_data, contract_address)
//!     .await?;
//! ```
//!
//! - [Wallet service][ws] connects the wallet and follows account and chain changes
//! - [Metadata service][ms] builds and pins credential metadata
//! - [Mint service][mint] mints and records a credential
//! - [Verification service][vs] checks ownership, token metadata and pinned content
//! - [Credential service][cs] records and lists minted credentials
//!
//! [ws]: service::wallet_service::WalletService
//! [ms]: service::metadata_service::MetadataService
//! [mint]: service::mint_service::MintService
//! [vs]: service::verification_service::VerificationService
//! [cs]: service::credential_service::CredentialService

use std::sync::Arc;

use config::PortGenieConfig;
use portgenie_providers::credential_storage::{
    imp::{
        in_memory::InMemoryStorage,
        postgrest::{Params as PostgrestParams, PostgrestStorage},
    },
    IpfsFileRepository, Web3CredentialRepository,
};
use portgenie_providers::eth_provider::{
    imp::json_rpc::{JsonRpcProvider, Params as JsonRpcParams},
    Eip1193Provider,
};
use portgenie_providers::http_client::imp::reqwest_client::ReqwestClient;
use portgenie_providers::http_client::HttpClient;
use portgenie_providers::ipfs::imp::pinata::{Params as PinataParams, PinataClient};
use portgenie_providers::network::{Explorer, Network};
use service::{
    credential_service::CredentialService, metadata_service::MetadataService,
    mint_service::MintService, verification_service::VerificationService,
    wallet_service::WalletService,
};

pub mod config;
pub mod model;
pub mod service;

pub struct PortGenieCore {
    pub wallet_service: WalletService,
    pub metadata_service: Arc<MetadataService>,
    pub mint_service: MintService,
    pub verification_service: VerificationService,
    pub credential_service: Arc<CredentialService>,
    network: Network,
}

impl Default for PortGenieCore {
    fn default() -> Self {
        Self::new(None, Arc::new(ReqwestClient::default()), None)
    }
}

impl PortGenieCore {
    /// `wallet` is the signing provider injected by the host; `None` when no
    /// wallet is installed.
    pub fn new(
        config: Option<PortGenieConfig>,
        client: Arc<dyn HttpClient>,
        wallet: Option<Arc<dyn Eip1193Provider>>,
    ) -> Self {
        let config = config.unwrap_or_default();

        // initialize storage
        let (credentials, ipfs_files): (
            Arc<dyn Web3CredentialRepository>,
            Arc<dyn IpfsFileRepository>,
        ) = match config.storage_config.supabase {
            Some(supabase) => {
                let storage = Arc::new(PostgrestStorage::new(
                    PostgrestParams {
                        base_url: supabase.url,
                        api_key: supabase.api_key,
                    },
                    client.clone(),
                ));
                (
                    storage.clone() as Arc<dyn Web3CredentialRepository>,
                    storage as Arc<dyn IpfsFileRepository>,
                )
            }
            None => {
                tracing::debug!("no remote store configured, using in-memory storage");
                let storage = Arc::new(InMemoryStorage::new());
                (
                    storage.clone() as Arc<dyn Web3CredentialRepository>,
                    storage as Arc<dyn IpfsFileRepository>,
                )
            }
        };

        // initialize IPFS pinning
        let ipfs = Arc::new(PinataClient::new(
            PinataParams {
                api_url: config.pinata_config.api_url,
                gateway_url: config.pinata_config.gateway_url,
                credentials: config.pinata_config.credentials,
            },
            client.clone(),
        ));

        // chain reads go through the configured node, else through the wallet
        let read_provider = match config.ethereum_config.rpc_url {
            Some(rpc_url) => Some(Arc::new(JsonRpcProvider::new(
                JsonRpcParams { rpc_url },
                client.clone(),
            )) as Arc<dyn Eip1193Provider>),
            None => wallet.clone(),
        };

        let metadata_service = Arc::new(MetadataService::new(ipfs.clone(), ipfs_files.clone()));
        let credential_service = Arc::new(CredentialService::new(credentials));

        let mint_service = MintService::new(
            wallet.clone(),
            metadata_service.clone(),
            credential_service.clone(),
            config.mint_config,
        );

        let verification_service =
            VerificationService::new(read_provider, client, ipfs, ipfs_files);

        Self {
            wallet_service: WalletService::new(wallet),
            metadata_service,
            mint_service,
            verification_service,
            credential_service,
            network: config.ethereum_config.network,
        }
    }

    /// Network the application is configured for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Explorer links for the configured network.
    pub fn explorer(&self) -> Explorer {
        Explorer::for_network(Some(self.network))
    }
}

#[cfg(test)]
mod test;
