use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    common_models::{
        credential::{CredentialType, NewWeb3Credential, Web3Credential, Web3CredentialId},
        ipfs_file::{IpfsFile, IpfsFileId, IpfsHash, NewIpfsFile},
    },
    credential_storage::{IpfsFileRepository, StorageError, Web3CredentialRepository},
};

/// Process-local storage, used when no remote data store is configured.
#[derive(Default)]
pub struct InMemoryStorage {
    credentials: Arc<Mutex<Vec<Web3Credential>>>,
    ipfs_files: Arc<Mutex<Vec<IpfsFile>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Web3CredentialRepository for InMemoryStorage {
    async fn create(&self, request: NewWeb3Credential) -> Result<Web3Credential, StorageError> {
        let credential = Web3Credential {
            id: Web3CredentialId::new_v4(),
            user_id: request.user_id,
            wallet_address: request.wallet_address,
            blockchain: request.blockchain,
            credential_type: request.credential_type,
            entity_id: request.entity_id,
            transaction_hash: request.transaction_hash,
            contract_address: request.contract_address,
            token_id: request.token_id,
            metadata_uri: request.metadata_uri,
            created_at: OffsetDateTime::now_utc(),
        };

        self.credentials.lock().await.push(credential.clone());

        Ok(credential)
    }

    async fn get_by_user(&self, user_id: &str) -> Result<Vec<Web3Credential>, StorageError> {
        let credentials = self.credentials.lock().await;

        Ok(credentials
            .iter()
            .rev()
            .filter(|credential| credential.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_by_entity(
        &self,
        credential_type: CredentialType,
        entity_id: &str,
    ) -> Result<Vec<Web3Credential>, StorageError> {
        let credentials = self.credentials.lock().await;

        Ok(credentials
            .iter()
            .rev()
            .filter(|credential| {
                credential.credential_type == credential_type && credential.entity_id == entity_id
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IpfsFileRepository for InMemoryStorage {
    async fn create(&self, request: NewIpfsFile) -> Result<IpfsFile, StorageError> {
        let file = IpfsFile {
            id: IpfsFileId::new_v4(),
            user_id: request.user_id,
            ipfs_hash: request.ipfs_hash,
            ipfs_url: request.ipfs_url,
            name: request.name,
            description: request.description,
            file_type: request.file_type,
            size: request.size,
            related_entity_type: request.related_entity_type,
            related_entity_id: request.related_entity_id,
            tags: request.tags,
            created_at: OffsetDateTime::now_utc(),
        };

        self.ipfs_files.lock().await.push(file.clone());

        Ok(file)
    }

    async fn get_by_hash(&self, hash: &IpfsHash) -> Result<Option<IpfsFile>, StorageError> {
        let files = self.ipfs_files.lock().await;

        Ok(files.iter().find(|file| &file.ipfs_hash == hash).cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_credential(user_id: &str, entity_id: &str) -> NewWeb3Credential {
        NewWeb3Credential {
            user_id: user_id.to_string(),
            wallet_address: "0xabc".to_string(),
            blockchain: "ethereum".to_string(),
            credential_type: CredentialType::Portfolio,
            entity_id: entity_id.to_string(),
            transaction_hash: "0xfeed".to_string(),
            contract_address: "0x1234".to_string(),
            token_id: "1".to_string(),
            metadata_uri: "ipfs://QmHash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_create_appends_a_row() {
        let storage = InMemoryStorage::new();

        let first = Web3CredentialRepository::create(&storage, new_credential("u1", "p1"))
            .await
            .unwrap();
        let second = Web3CredentialRepository::create(&storage, new_credential("u1", "p1"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let rows = storage.get_by_user("u1").await.unwrap();
        assert_eq!(rows.len(), 2);
        // newest first
        assert_eq!(rows[0].id, second.id);
        assert!(storage.get_by_user("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_entity_filters_on_type() {
        let storage = InMemoryStorage::new();
        Web3CredentialRepository::create(&storage, new_credential("u1", "p1"))
            .await
            .unwrap();

        let found = storage
            .get_by_entity(CredentialType::Portfolio, "p1")
            .await
            .unwrap();
        let other_type = storage
            .get_by_entity(CredentialType::Resume, "p1")
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token_id, "1");
        assert!(other_type.is_empty());
    }

    #[tokio::test]
    async fn test_ipfs_file_lookup() {
        let storage = InMemoryStorage::new();
        let hash = IpfsHash::from("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");

        IpfsFileRepository::create(
            &storage,
            NewIpfsFile {
                user_id: "u1".to_string(),
                ipfs_hash: hash.clone(),
                ipfs_url: hash.to_uri(),
                name: "portfolio-p1-metadata.json".to_string(),
                description: None,
                file_type: "application/json".to_string(),
                size: 312,
                related_entity_type: Some(CredentialType::Portfolio),
                related_entity_id: Some("p1".to_string()),
                tags: vec!["portfolio".to_string()],
            },
        )
        .await
        .unwrap();

        let file = storage.get_by_hash(&hash).await.unwrap().unwrap();
        assert_eq!(file.size, 312);
        assert!(storage
            .get_by_hash(&IpfsHash::from("QmOther"))
            .await
            .unwrap()
            .is_none());
    }
}
