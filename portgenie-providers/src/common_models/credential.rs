use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::common_models::macros::uuid_newtype;

/// Blockchain label written to every minted credential.
pub const DEFAULT_BLOCKCHAIN: &str = "ethereum";

/// Kind of entity a credential certifies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, serde::Serialize, serde::Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    Certificate,
    Resume,
    Portfolio,
}

uuid_newtype!(Web3CredentialId);

/// A persisted mint outcome (`web3_credentials` row).
///
/// Rows are append-only: the transaction hash and token id recorded for an
/// entity never change after insertion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Web3Credential {
    pub id: Web3CredentialId,
    pub user_id: String,
    pub wallet_address: String,
    pub blockchain: String,
    pub credential_type: CredentialType,
    pub entity_id: String,
    pub transaction_hash: String,
    pub contract_address: String,
    pub token_id: String,
    pub metadata_uri: String,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewWeb3Credential {
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
