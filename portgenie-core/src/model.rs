use portgenie_providers::common_models::{
    credential::{CredentialType, Web3Credential},
    ipfs_file::{IpfsFile, IpfsHash},
};
use portgenie_providers::network::Network;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// Active wallet connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: String,
    /// Lowercase network name, `unknown` for chains outside the catalogue.
    pub network: String,
    /// Decimal chain id.
    pub chain_id: String,
}

impl WalletSession {
    pub fn new(address: String, chain_id: u64) -> Self {
        Self {
            address,
            network: network_name(chain_id),
            chain_id: chain_id.to_string(),
        }
    }
}

pub(crate) fn network_name(chain_id: u64) -> String {
    Network::from_chain_id(chain_id)
        .map(|network| network.to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Session change pushed by the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    AccountChanged { address: String },
    Disconnected,
    ChainChanged { chain_id: String, network: String },
}

/// Entity being certified, with the fields its metadata is built from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityData {
    Certificate(CertificateData),
    Resume(ResumeData),
    Portfolio(PortfolioData),
}

impl EntityData {
    pub fn credential_type(&self) -> CredentialType {
        match self {
            Self::Certificate(_) => CredentialType::Certificate,
            Self::Resume(_) => CredentialType::Resume,
            Self::Portfolio(_) => CredentialType::Portfolio,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Certificate(data) => &data.title,
            Self::Resume(data) => &data.title,
            Self::Portfolio(data) => &data.title,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CertificateData {
    pub title: String,
    pub description: String,
    pub issuer: String,
    pub issue_date: String,
    pub credential_id: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ResumeData {
    pub title: String,
    pub content: Value,
    pub template: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PortfolioData {
    pub title: String,
    pub description: String,
    pub theme: String,
    pub color_scheme: String,
    pub created_at: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// NFT metadata document (ERC-721 metadata JSON with marketplace attributes).
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CredentialMetadata {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub external_url: Option<String>,
    pub attributes: Vec<MetadataAttribute>,
    /// Entity specific top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub display_type: Option<String>,
    pub trait_type: String,
    pub value: Value,
}

impl MetadataAttribute {
    pub fn new(trait_type: &str, value: impl Into<Value>) -> Self {
        Self {
            display_type: None,
            trait_type: trait_type.to_owned(),
            value: value.into(),
        }
    }

    /// Attribute rendered as a date by marketplaces; `value` is Unix epoch seconds.
    pub fn date(trait_type: &str, epoch_seconds: i64) -> Self {
        Self {
            display_type: Some("date".to_owned()),
            trait_type: trait_type.to_owned(),
            value: epoch_seconds.into(),
        }
    }
}

/// Metadata pinned to IPFS.
#[derive(Clone, Debug, PartialEq)]
pub struct PackagedMetadata {
    pub metadata: CredentialMetadata,
    pub ipfs_hash: IpfsHash,
    /// `ipfs://<hash>`
    pub metadata_uri: String,
    pub gateway_url: String,
    /// `None` when the `ipfs_files` row could not be written.
    pub ipfs_file: Option<IpfsFile>,
}

/// Blockchain-confirmed outcome of a mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    pub transaction_hash: String,
    /// Decimal string.
    pub token_id: String,
    pub metadata_uri: String,
    pub contract_address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintedCredential {
    pub result: MintResult,
    pub credential: Web3Credential,
}

/// Fields handed to the credential recorder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialFields {
    pub wallet_address: String,
    pub blockchain: String,
    pub credential_type: CredentialType,
    pub entity_id: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token_id: String,
    pub metadata_uri: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipVerification {
    pub is_owner: bool,
    /// Current owner, checksummed.
    pub owner: String,
    pub expected_owner: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadata {
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    pub metadata: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IpfsVerification {
    pub ipfs_hash: IpfsHash,
    pub gateway_url: String,
    /// The gateway serves the content.
    pub exists: bool,
    pub database_record: Option<IpfsFile>,
    pub pin_metadata: Option<Value>,
    /// Parsed JSON, or the raw text when the content is not JSON.
    pub content: Option<Value>,
}

impl IpfsVerification {
    /// Content is reachable and was pinned through this application.
    pub fn is_verified(&self) -> bool {
        self.exists && self.database_record.is_some()
    }
}
