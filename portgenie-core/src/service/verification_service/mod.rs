//! Read-only checks of minted credentials and pinned content.

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use portgenie_providers::common_models::{credential::Web3Credential, ipfs_file::IpfsHash};
use portgenie_providers::contract::{parse_token_id, CertificateContract};
use portgenie_providers::credential_storage::IpfsFileRepository;
use portgenie_providers::eth_provider::Eip1193Provider;
use portgenie_providers::http_client::HttpClient;
use portgenie_providers::ipfs::IpfsPinning;
use serde_json::Value;

use crate::{
    model::{IpfsVerification, NftMetadata, OwnershipVerification},
    service::error::VerificationServiceError,
};

pub struct VerificationService {
    read_provider: Option<Arc<dyn Eip1193Provider>>,
    client: Arc<dyn HttpClient>,
    ipfs: Arc<dyn IpfsPinning>,
    ipfs_files: Arc<dyn IpfsFileRepository>,
}

impl VerificationService {
    pub fn new(
        read_provider: Option<Arc<dyn Eip1193Provider>>,
        client: Arc<dyn HttpClient>,
        ipfs: Arc<dyn IpfsPinning>,
        ipfs_files: Arc<dyn IpfsFileRepository>,
    ) -> Self {
        Self {
            read_provider,
            client,
            ipfs,
            ipfs_files,
        }
    }

    fn contract(&self, contract_address: &str) -> Result<CertificateContract, VerificationServiceError> {
        let provider = self
            .read_provider
            .clone()
            .ok_or(VerificationServiceError::ProviderNotFound)?;
        let address = Address::from_str(contract_address)
            .map_err(|_| VerificationServiceError::InvalidAddress(contract_address.to_string()))?;

        Ok(CertificateContract::new(address, provider))
    }

    /// Checks that `expected_owner` currently owns the token. Letter case of
    /// the addresses is ignored.
    pub async fn verify_ownership(
        &self,
        contract_address: &str,
        token_id: &str,
        expected_owner: &str,
    ) -> Result<OwnershipVerification, VerificationServiceError> {
        let contract = self.contract(contract_address)?;
        let token_id = parse_token_id(token_id).map_err(VerificationServiceError::InvalidTokenId)?;

        let owner = contract.owner_of(token_id).await.map_err(|e| {
            tracing::warn!(contract_address, %token_id, "ownership check failed: {e}");
            VerificationServiceError::OwnershipCheck(e)
        })?;
        let owner = owner.to_string();

        Ok(OwnershipVerification {
            is_owner: owner.eq_ignore_ascii_case(expected_owner),
            owner,
            expected_owner: expected_owner.to_string(),
        })
    }

    /// Re-checks a recorded credential against its wallet address.
    pub async fn verify_credential(
        &self,
        credential: &Web3Credential,
    ) -> Result<OwnershipVerification, VerificationServiceError> {
        self.verify_ownership(
            &credential.contract_address,
            &credential.token_id,
            &credential.wallet_address,
        )
        .await
    }

    /// Reads `tokenURI` and fetches the metadata behind it; `ipfs://` URIs
    /// go through the IPFS gateway. Nothing is cached.
    pub async fn get_metadata(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<NftMetadata, VerificationServiceError> {
        let contract = self.contract(contract_address)?;
        let token_id = parse_token_id(token_id).map_err(VerificationServiceError::InvalidTokenId)?;

        let token_uri = contract.token_uri(token_id).await.map_err(|e| {
            tracing::warn!(contract_address, %token_id, "tokenURI lookup failed: {e}");
            VerificationServiceError::TokenUri(e)
        })?;

        let body = match IpfsHash::from_uri(&token_uri) {
            Some(hash) => self.ipfs.fetch(&hash).await.map_err(|e| {
                VerificationServiceError::MetadataFetch(format!("{token_uri}: {e}"))
            })?,
            None => {
                let response = self
                    .client
                    .get(&token_uri)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(|e| {
                        VerificationServiceError::MetadataFetch(format!("{token_uri}: {e}"))
                    })?;
                response.body
            }
        };

        Ok(NftMetadata {
            metadata: serde_json::from_slice(&body)?,
            token_uri,
        })
    }

    /// Gathers what is known about pinned content.
    ///
    /// Only a malformed hash fails; every unavailable piece is reported as
    /// absent.
    pub async fn verify_ipfs_content(
        &self,
        ipfs_hash: &IpfsHash,
    ) -> Result<IpfsVerification, VerificationServiceError> {
        if !ipfs_hash.is_well_formed() {
            return Err(VerificationServiceError::InvalidIpfsHash(
                ipfs_hash.to_string(),
            ));
        }

        let database_record = self
            .ipfs_files
            .get_by_hash(ipfs_hash)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(%ipfs_hash, "ipfs_files lookup failed: {e}");
                None
            });

        let exists = self.ipfs.exists(ipfs_hash).await.unwrap_or_else(|e| {
            tracing::warn!(%ipfs_hash, "gateway check failed: {e}");
            false
        });

        let content = if exists {
            match self.ipfs.fetch(ipfs_hash).await {
                Ok(body) => Some(content_value(body)),
                Err(e) => {
                    tracing::warn!(%ipfs_hash, "content fetch failed: {e}");
                    None
                }
            }
        } else {
            None
        };

        let pin_metadata = self.ipfs.pin_metadata(ipfs_hash).await.unwrap_or_else(|e| {
            tracing::warn!(%ipfs_hash, "pin metadata lookup failed: {e}");
            None
        });

        Ok(IpfsVerification {
            ipfs_hash: ipfs_hash.clone(),
            gateway_url: self.ipfs.gateway_url(ipfs_hash),
            exists,
            database_record,
            pin_metadata,
            content,
        })
    }
}

fn content_value(body: Vec<u8>) -> Value {
    serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
}
