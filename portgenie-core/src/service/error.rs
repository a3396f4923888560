use portgenie_providers::contract::error::ContractError;
use portgenie_providers::credential_storage::StorageError;
use portgenie_providers::eth_provider::error::ProviderError;
use portgenie_providers::ipfs::error::IpfsError;
use thiserror::Error;

use crate::model::MintResult;

#[derive(Debug, Error)]
pub enum WalletServiceError {
    #[error("No Ethereum wallet provider found, install one from {install_url}")]
    ProviderNotFound { install_url: &'static str },
    #[error("User rejected the request")]
    UserRejected,
    #[error("Wallet returned no accounts")]
    NoAccounts,
    #[error("Invalid chain id `{0}`")]
    InvalidChainId(String),
    #[error("Provider error: `{0}`")]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum MetadataServiceError {
    #[error("Invalid date `{0}`")]
    InvalidDate(String),
    #[error("IPFS error: `{0}`")]
    Ipfs(#[from] IpfsError),
    #[error("JSON error: `{0}`")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum MintServiceError {
    #[error("No Ethereum wallet provider found")]
    ProviderNotFound,
    #[error("Invalid address `{0}`")]
    InvalidAddress(String),
    #[error("Metadata error: `{0}`")]
    Metadata(#[from] MetadataServiceError),
    #[error("Transaction submission failed: {0}")]
    TransactionSubmission(ProviderError),
    #[error("Contract error: `{0}`")]
    Contract(#[from] ContractError),
    /// The token exists on chain but no `web3_credentials` row was written.
    #[error("Minted token {} in `{}` but recording failed: {source}", result.token_id, result.transaction_hash)]
    RecordFailed {
        result: Box<MintResult>,
        source: CredentialServiceError,
    },
}

#[derive(Debug, Error)]
pub enum VerificationServiceError {
    #[error("No provider available for chain reads")]
    ProviderNotFound,
    #[error("Invalid address `{0}`")]
    InvalidAddress(String),
    #[error("Invalid token id: `{0}`")]
    InvalidTokenId(ContractError),
    #[error("Ownership check failed: `{0}`")]
    OwnershipCheck(ContractError),
    #[error("Token URI lookup failed: `{0}`")]
    TokenUri(ContractError),
    #[error("Metadata fetch failed: `{0}`")]
    MetadataFetch(String),
    #[error("Invalid metadata: `{0}`")]
    InvalidMetadata(#[from] serde_json::Error),
    #[error("Invalid IPFS hash format `{0}`")]
    InvalidIpfsHash(String),
}

#[derive(Debug, Error)]
pub enum CredentialServiceError {
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}
