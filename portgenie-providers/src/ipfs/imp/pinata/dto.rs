use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ipfs::model::{PinMetadata, PinResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PinJsonRequestDTO<'a> {
    pub pinata_content: &'a serde_json::Value,
    pub pinata_metadata: PinataMetadataDTO,
    pub pinata_options: PinataOptionsDTO,
}

#[derive(Debug, Serialize)]
pub(super) struct PinataMetadataDTO {
    pub name: String,
    pub keyvalues: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PinataOptionsDTO {
    pub cid_version: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct PinResponseDTO {
    pub ipfs_hash: String,
    pub pin_size: u64,
    pub timestamp: String,
    #[serde(default, rename = "isDuplicate")]
    pub is_duplicate: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PinListDTO {
    #[serde(default)]
    pub rows: Vec<PinListRowDTO>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PinListRowDTO {
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<PinMetadata> for PinataMetadataDTO {
    fn from(value: PinMetadata) -> Self {
        Self {
            name: value.name,
            keyvalues: value.key_values,
        }
    }
}

impl From<PinResponseDTO> for PinResponse {
    fn from(value: PinResponseDTO) -> Self {
        Self {
            ipfs_hash: value.ipfs_hash.into(),
            pin_size: value.pin_size,
            timestamp: value.timestamp,
            is_duplicate: value.is_duplicate.unwrap_or(false),
        }
    }
}
