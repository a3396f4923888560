use time::OffsetDateTime;

use crate::common_models::{
    credential::CredentialType,
    macros::{string_newtype, uuid_newtype},
};

string_newtype!(
    /// IPFS content identifier (CIDv0 `Qm...` or CIDv1 `bafy...`).
    IpfsHash
);

uuid_newtype!(IpfsFileId);

const CID_V0_PREFIX: &str = "Qm";
const CID_V0_LEN: usize = 46;
const CID_V1_PREFIX: &str = "bafy";
const CID_V1_LEN: usize = 59;
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

impl IpfsHash {
    /// Checks the textual shape of the hash; does not check that the content exists.
    pub fn is_well_formed(&self) -> bool {
        let value = self.as_str();

        if let Some(rest) = value.strip_prefix(CID_V0_PREFIX) {
            value.len() == CID_V0_LEN && rest.chars().all(|c| BASE58_ALPHABET.contains(c))
        } else if let Some(rest) = value.strip_prefix(CID_V1_PREFIX) {
            value.len() == CID_V1_LEN && rest.chars().all(|c| c.is_ascii_alphanumeric())
        } else {
            false
        }
    }

    /// `ipfs://<hash>` form used as NFT token URI.
    pub fn to_uri(&self) -> String {
        format!("ipfs://{}", self.as_str())
    }

    /// Extracts the hash from an `ipfs://` URI.
    pub fn from_uri(uri: &str) -> Option<Self> {
        uri.strip_prefix("ipfs://")
            .filter(|hash| !hash.is_empty())
            .map(Self::from)
    }
}

/// A pinned file (`ipfs_files` row).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IpfsFile {
    pub id: IpfsFileId,
    pub user_id: String,
    pub ipfs_hash: IpfsHash,
    pub ipfs_url: String,
    pub name: String,
    pub description: Option<String>,
    pub file_type: String,
    pub size: u64,
    pub related_entity_type: Option<CredentialType>,
    pub related_entity_id: Option<String>,
    pub tags: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewIpfsFile {
    pub user_id: String,
    pub ipfs_hash: IpfsHash,
    pub ipfs_url: String,
    pub name: String,
    pub description: Option<String>,
    pub file_type: String,
    pub size: u64,
    pub related_entity_type: Option<CredentialType>,
    pub related_entity_id: Option<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_well_formed_hashes() {
        let v0 = IpfsHash::from("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
        let v1 = IpfsHash::from("bafybeidqvihld4k77iqe2qiiu5ajlktcxvswbj7eivplh3tm2tedrlzeym");

        assert!(v0.is_well_formed());
        assert!(v1.is_well_formed());
    }

    #[test]
    fn test_malformed_hashes() {
        for value in [
            "",
            "Qm",
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbd0",
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdGx",
            "bafy-eidqvihld4k77iqe2qiiu5ajlktcxvswbj7eivplh3tm2tedrlzeym",
            "zdj7WWeQ43G6JJvLWQWZpyHuAMq6uYWRjkBXFad11vE2LHhQ7",
        ] {
            assert!(!IpfsHash::from(value).is_well_formed(), "{value}");
        }
    }

    #[test]
    fn test_uri_conversion() {
        let hash = IpfsHash::from("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");

        assert_eq!(
            hash.to_uri(),
            "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
        assert_eq!(IpfsHash::from_uri(&hash.to_uri()), Some(hash));
        assert_eq!(IpfsHash::from_uri("https://example.com/1.json"), None);
        assert_eq!(IpfsHash::from_uri("ipfs://"), None);
    }
}
