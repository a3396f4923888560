//! Storage over a PostgREST endpoint (Supabase `rest/v1`).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroizing;

use crate::{
    common_models::{
        credential::{CredentialType, NewWeb3Credential, Web3Credential},
        ipfs_file::{IpfsFile, IpfsHash, NewIpfsFile},
    },
    credential_storage::{
        imp::postgrest::dto::{IpfsFileDTO, NewIpfsFileDTO, NewWeb3CredentialDTO, Web3CredentialDTO},
        IpfsFileRepository, StorageError, Web3CredentialRepository,
    },
    http_client::{HttpClient, RequestBuilder},
};

mod dto;

const WEB3_CREDENTIALS_TABLE: &str = "web3_credentials";
const IPFS_FILES_TABLE: &str = "ipfs_files";

pub struct Params {
    /// Project URL, e.g. `https://<project>.supabase.co`.
    pub base_url: String,
    pub api_key: Zeroizing<String>,
}

pub struct PostgrestStorage {
    params: Params,
    client: Arc<dyn HttpClient>,
}

impl PostgrestStorage {
    pub fn new(params: Params, client: Arc<dyn HttpClient>) -> Self {
        Self { params, client }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.params.base_url.trim_end_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.params.api_key)
            .bearer_auth(&self.params.api_key)
    }

    async fn insert<B: Serialize + Send, T: DeserializeOwned + Send>(
        &self,
        table: &str,
        body: B,
    ) -> Result<T, StorageError> {
        let response = self
            .authorize(self.client.post(&self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .map_err(|e| StorageError::Insert(e.to_string()))?
            .send()
            .await
            .map_err(|e| StorageError::Insert(e.to_string()))?;

        if !response.status.is_success() {
            return Err(StorageError::Insert(format!(
                "{table}: status {}: {}",
                response.status,
                String::from_utf8_lossy(&response.body)
            )));
        }

        let rows: Vec<T> = response
            .json()
            .map_err(|e| StorageError::Mapping(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::Mapping(format!("{table}: insert returned no row")))
    }

    async fn select<T: DeserializeOwned + Send>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StorageError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_owned())];
        query.extend(filters.iter().cloned());

        self.authorize(self.client.get(&self.table_url(table)))
            .query(query)
            .map_err(|e| StorageError::Query(e.to_string()))?
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| StorageError::Query(format!("{table}: {e}")))?
            .json()
            .map_err(|e| StorageError::Mapping(e.to_string()))
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait::async_trait]
impl Web3CredentialRepository for PostgrestStorage {
    async fn create(&self, request: NewWeb3Credential) -> Result<Web3Credential, StorageError> {
        let row: Web3CredentialDTO = self
            .insert(WEB3_CREDENTIALS_TABLE, NewWeb3CredentialDTO::from(request))
            .await?;

        Ok(row.into())
    }

    async fn get_by_user(&self, user_id: &str) -> Result<Vec<Web3Credential>, StorageError> {
        let rows: Vec<Web3CredentialDTO> = self
            .select(
                WEB3_CREDENTIALS_TABLE,
                &[
                    ("user_id", eq(user_id)),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_entity(
        &self,
        credential_type: CredentialType,
        entity_id: &str,
    ) -> Result<Vec<Web3Credential>, StorageError> {
        let rows: Vec<Web3CredentialDTO> = self
            .select(
                WEB3_CREDENTIALS_TABLE,
                &[
                    ("credential_type", eq(credential_type)),
                    ("entity_id", eq(entity_id)),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl IpfsFileRepository for PostgrestStorage {
    async fn create(&self, request: NewIpfsFile) -> Result<IpfsFile, StorageError> {
        let row: IpfsFileDTO = self
            .insert(IPFS_FILES_TABLE, NewIpfsFileDTO::from(request))
            .await?;

        Ok(row.into())
    }

    async fn get_by_hash(&self, hash: &IpfsHash) -> Result<Option<IpfsFile>, StorageError> {
        let rows: Vec<IpfsFileDTO> = self
            .select(
                IPFS_FILES_TABLE,
                &[("ipfs_hash", eq(hash)), ("limit", "1".to_owned())],
            )
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }
}
