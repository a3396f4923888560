//! IPFS pinning service.
//!
//! Content is addressed by its hash once pinned; every call goes to the remote
//! service, nothing is cached locally.

use crate::{
    common_models::ipfs_file::IpfsHash,
    ipfs::{
        error::IpfsError,
        model::{PinMetadata, PinResponse},
    },
};

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait IpfsPinning: Send + Sync {
    /// Pins a JSON document.
    async fn pin_json(
        &self,
        content: &serde_json::Value,
        metadata: PinMetadata,
    ) -> Result<PinResponse, IpfsError>;

    /// Pins an arbitrary file.
    async fn pin_file(
        &self,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
        metadata: PinMetadata,
    ) -> Result<PinResponse, IpfsError>;

    /// Retrieves pinned content through the public gateway.
    async fn fetch(&self, hash: &IpfsHash) -> Result<Vec<u8>, IpfsError>;

    /// Checks that the gateway serves the content.
    async fn exists(&self, hash: &IpfsHash) -> Result<bool, IpfsError>;

    /// Metadata attached to the pin, if the service knows the hash.
    async fn pin_metadata(&self, hash: &IpfsHash)
        -> Result<Option<serde_json::Value>, IpfsError>;

    fn gateway_url(&self, hash: &IpfsHash) -> String;
}
