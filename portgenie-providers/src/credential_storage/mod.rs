//! Durable storage for minted credentials (`web3_credentials`) and pinned
//! files (`ipfs_files`).
//!
//! Both tables are append-only from the workflow's point of view.

use thiserror::Error;

use crate::common_models::{
    credential::{CredentialType, NewWeb3Credential, Web3Credential},
    ipfs_file::{IpfsFile, IpfsHash, NewIpfsFile},
};

pub mod imp;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Insert error: `{0}`")]
    Insert(String),
    #[error("Query error: `{0}`")]
    Query(String),
    #[error("Mapping error: `{0}`")]
    Mapping(String),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait Web3CredentialRepository: Send + Sync {
    /// Inserts a new row; there is no update path.
    async fn create(&self, request: NewWeb3Credential) -> Result<Web3Credential, StorageError>;

    /// Newest first.
    async fn get_by_user(&self, user_id: &str) -> Result<Vec<Web3Credential>, StorageError>;

    async fn get_by_entity(
        &self,
        credential_type: CredentialType,
        entity_id: &str,
    ) -> Result<Vec<Web3Credential>, StorageError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait IpfsFileRepository: Send + Sync {
    async fn create(&self, request: NewIpfsFile) -> Result<IpfsFile, StorageError>;

    async fn get_by_hash(&self, hash: &IpfsHash) -> Result<Option<IpfsFile>, StorageError>;
}
