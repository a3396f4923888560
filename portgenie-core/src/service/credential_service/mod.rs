//! Durable record of minted credentials.

use std::sync::Arc;

use portgenie_providers::common_models::credential::{
    CredentialType, NewWeb3Credential, Web3Credential,
};
use portgenie_providers::credential_storage::Web3CredentialRepository;

use crate::{model::CredentialFields, service::error::CredentialServiceError};

pub struct CredentialService {
    repository: Arc<dyn Web3CredentialRepository>,
}

impl CredentialService {
    pub fn new(repository: Arc<dyn Web3CredentialRepository>) -> Self {
        Self { repository }
    }

    /// Inserts one row per mint; nothing is updated or retried.
    pub async fn record(
        &self,
        user_id: &str,
        fields: CredentialFields,
    ) -> Result<Web3Credential, CredentialServiceError> {
        let credential = self
            .repository
            .create(NewWeb3Credential {
                user_id: user_id.to_string(),
                wallet_address: fields.wallet_address,
                blockchain: fields.blockchain,
                credential_type: fields.credential_type,
                entity_id: fields.entity_id,
                transaction_hash: fields.transaction_hash,
                contract_address: fields.contract_address,
                token_id: fields.token_id,
                metadata_uri: fields.metadata_uri,
            })
            .await
            .map_err(|e| {
                tracing::error!(user_id, "failed to record credential: {e}");
                e
            })?;

        tracing::info!(id = %credential.id, token_id = %credential.token_id, "credential recorded");
        Ok(credential)
    }

    /// Newest first.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Web3Credential>, CredentialServiceError> {
        Ok(self.repository.get_by_user(user_id).await?)
    }

    pub async fn find_for_entity(
        &self,
        credential_type: CredentialType,
        entity_id: &str,
    ) -> Result<Vec<Web3Credential>, CredentialServiceError> {
        Ok(self
            .repository
            .get_by_entity(credential_type, entity_id)
            .await?)
    }
}
