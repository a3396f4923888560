use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::{
    credential::{CredentialType, NewWeb3Credential, Web3Credential},
    ipfs_file::{IpfsFile, NewIpfsFile},
};

#[derive(Debug, Serialize)]
pub(super) struct NewWeb3CredentialDTO {
    pub user_id: String,
    pub wallet_address: String,
    pub blockchain: String,
    pub credential_type: CredentialType,
    pub entity_id: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token_id: String,
    pub metadata_uri: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Web3CredentialDTO {
    pub id: Uuid,
    pub user_id: String,
    pub wallet_address: String,
    pub blockchain: String,
    pub credential_type: CredentialType,
    pub entity_id: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token_id: String,
    pub metadata_uri: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub(super) struct NewIpfsFileDTO {
    pub user_id: String,
    pub ipfs_hash: String,
    pub ipfs_url: String,
    pub name: String,
    pub description: Option<String>,
    pub file_type: String,
    pub size: u64,
    pub related_entity_type: Option<CredentialType>,
    pub related_entity_id: Option<String>,
    pub tags: Vec<String>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct IpfsFileDTO {
    pub id: Uuid,
    pub user_id: String,
    pub ipfs_hash: String,
    pub ipfs_url: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub related_entity_type: Option<CredentialType>,
    #[serde(default)]
    pub related_entity_id: Option<String>,
    // `text[]` columns come back as `null` when unset
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<NewWeb3Credential> for NewWeb3CredentialDTO {
    fn from(value: NewWeb3Credential) -> Self {
        Self {
            user_id: value.user_id,
            wallet_address: value.wallet_address,
            blockchain: value.blockchain,
            credential_type: value.credential_type,
            entity_id: value.entity_id,
            transaction_hash: value.transaction_hash,
            contract_address: value.contract_address,
            token_id: value.token_id,
            metadata_uri: value.metadata_uri,
        }
    }
}

impl From<Web3CredentialDTO> for Web3Credential {
    fn from(value: Web3CredentialDTO) -> Self {
        Self {
            id: value.id.into(),
            user_id: value.user_id,
            wallet_address: value.wallet_address,
            blockchain: value.blockchain,
            credential_type: value.credential_type,
            entity_id: value.entity_id,
            transaction_hash: value.transaction_hash,
            contract_address: value.contract_address,
            token_id: value.token_id,
            metadata_uri: value.metadata_uri,
            created_at: value.created_at,
        }
    }
}

impl From<NewIpfsFile> for NewIpfsFileDTO {
    fn from(value: NewIpfsFile) -> Self {
        Self {
            user_id: value.user_id,
            ipfs_hash: value.ipfs_hash.into(),
            ipfs_url: value.ipfs_url,
            name: value.name,
            description: value.description,
            file_type: value.file_type,
            size: value.size,
            related_entity_type: value.related_entity_type,
            related_entity_id: value.related_entity_id,
            tags: value.tags,
        }
    }
}

impl From<IpfsFileDTO> for IpfsFile {
    fn from(value: IpfsFileDTO) -> Self {
        Self {
            id: value.id.into(),
            user_id: value.user_id,
            ipfs_hash: value.ipfs_hash.into(),
            ipfs_url: value.ipfs_url,
            name: value.name,
            description: value.description,
            file_type: value.file_type,
            size: value.size,
            related_entity_type: value.related_entity_type,
            related_entity_id: value.related_entity_id,
            tags: value.tags,
            created_at: value.created_at,
        }
    }
}
