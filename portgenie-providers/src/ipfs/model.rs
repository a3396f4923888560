use std::collections::BTreeMap;

use crate::common_models::ipfs_file::IpfsHash;

/// Descriptive metadata stored by the pinning service next to the content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinMetadata {
    pub name: String,
    pub key_values: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinResponse {
    pub ipfs_hash: IpfsHash,
    pub pin_size: u64,
    pub timestamp: String,
    pub is_duplicate: bool,
}
