//! Mints a credential NFT for an entity.
//!
//! The steps run strictly in order and any failure aborts the mint:
//! metadata is pinned, `mint(to, tokenURI)` is submitted through the wallet,
//! the receipt is awaited, the token id is read from it and only then the
//! credential is recorded.

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use portgenie_providers::contract::{error::ContractError, CertificateContract};
use portgenie_providers::eth_provider::Eip1193Provider;

use crate::{
    config::MintConfig,
    model::{CredentialFields, EntityData, MintResult, MintedCredential, WalletSession},
    service::{
        credential_service::CredentialService, error::MintServiceError,
        metadata_service::MetadataService,
    },
};

pub struct MintService {
    wallet: Option<Arc<dyn Eip1193Provider>>,
    metadata_service: Arc<MetadataService>,
    credential_service: Arc<CredentialService>,
    config: MintConfig,
}

impl MintService {
    pub fn new(
        wallet: Option<Arc<dyn Eip1193Provider>>,
        metadata_service: Arc<MetadataService>,
        credential_service: Arc<CredentialService>,
        config: MintConfig,
    ) -> Self {
        Self {
            wallet,
            metadata_service,
            credential_service,
            config,
        }
    }

    /// Mints to the session's own address.
    ///
    /// Waits for the receipt for as long as configured; a wallet switch in
    /// the meantime does not cancel the mint.
    pub async fn mint(
        &self,
        user_id: &str,
        session: &WalletSession,
        entity_id: &str,
        entity_data: &EntityData,
        contract_address: &str,
    ) -> Result<MintedCredential, MintServiceError> {
        let provider = self
            .wallet
            .clone()
            .ok_or(MintServiceError::ProviderNotFound)?;
        let owner = parse_address(&session.address)?;
        let contract = CertificateContract::new(parse_address(contract_address)?, provider);

        let packaged = self
            .metadata_service
            .package(user_id, entity_id, entity_data)
            .await?;

        let tx_hash = contract
            .send_mint(owner, owner, &packaged.metadata_uri)
            .await
            .map_err(|e| {
                tracing::error!(entity_id, "mint submission failed: {e}");
                match e {
                    ContractError::Provider(e) => MintServiceError::TransactionSubmission(e),
                    e => MintServiceError::Contract(e),
                }
            })?;
        tracing::info!(%tx_hash, entity_id, "mint submitted");

        let receipt = contract
            .wait_for_receipt(
                &tx_hash,
                self.config.receipt_poll_interval,
                self.config.receipt_timeout,
            )
            .await?;
        if receipt.is_reverted() {
            tracing::error!(%tx_hash, "mint reverted");
            return Err(ContractError::TransactionReverted(receipt.transaction_hash).into());
        }

        let token_id = receipt.minted_token_id()?.to_string();
        let result = MintResult {
            transaction_hash: receipt.transaction_hash,
            token_id,
            metadata_uri: packaged.metadata_uri,
            contract_address: contract_address.to_string(),
        };
        tracing::info!(token_id = %result.token_id, "mint confirmed");

        let recorded = self
            .credential_service
            .record(
                user_id,
                CredentialFields {
                    wallet_address: session.address.clone(),
                    blockchain: self.config.blockchain.clone(),
                    credential_type: entity_data.credential_type(),
                    entity_id: entity_id.to_string(),
                    transaction_hash: result.transaction_hash.clone(),
                    contract_address: result.contract_address.clone(),
                    token_id: result.token_id.clone(),
                    metadata_uri: result.metadata_uri.clone(),
                },
            )
            .await;

        match recorded {
            Ok(credential) => Ok(MintedCredential { result, credential }),
            Err(source) => Err(MintServiceError::RecordFailed {
                result: Box::new(result),
                source,
            }),
        }
    }
}

fn parse_address(value: &str) -> Result<Address, MintServiceError> {
    Address::from_str(value).map_err(|_| MintServiceError::InvalidAddress(value.to_string()))
}
