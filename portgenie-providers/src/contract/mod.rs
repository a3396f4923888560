//! Binding for the certificate NFT contract.
//!
//! Only the three functions the credential workflow needs are bound:
//! `mint(address,string)`, `tokenURI(uint256)` and `ownerOf(uint256)`.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{hex, Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use serde_json::json;

use crate::{
    contract::{error::ContractError, receipt::TransactionReceipt},
    eth_provider::{
        request_as, Eip1193Provider, ETH_CALL, ETH_GET_TRANSACTION_RECEIPT, ETH_SEND_TRANSACTION,
    },
};

pub mod error;
pub mod receipt;

sol! {
    interface ICertificateNft {
        function mint(address to, string tokenURI) external returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string);
        function ownerOf(uint256 tokenId) external view returns (address);
    }
}

/// Handle to a deployed certificate contract, bound to one provider.
pub struct CertificateContract {
    address: Address,
    provider: Arc<dyn Eip1193Provider>,
}

impl CertificateContract {
    pub fn new(address: Address, provider: Arc<dyn Eip1193Provider>) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Submits `mint(to, tokenURI)` signed by `from` and returns the transaction hash.
    pub async fn send_mint(
        &self,
        from: Address,
        to: Address,
        token_uri: &str,
    ) -> Result<String, ContractError> {
        let data = Bytes::from(
            ICertificateNft::mintCall {
                to,
                tokenURI: token_uri.to_owned(),
            }
            .abi_encode(),
        );

        let tx_hash: String = request_as(
            self.provider.as_ref(),
            ETH_SEND_TRANSACTION,
            json!([{
                "from": from,
                "to": self.address,
                "data": data,
            }]),
        )
        .await?;

        Ok(tx_hash)
    }

    /// Polls for the receipt of `tx_hash` until it is mined.
    ///
    /// Without a `timeout` this waits for as long as the transaction stays pending.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: &str,
        poll_interval: Duration,
        timeout: Option<Duration>,
    ) -> Result<TransactionReceipt, ContractError> {
        let polling = self.poll_receipt(tx_hash, poll_interval);

        match timeout {
            None => polling.await,
            Some(timeout) => tokio::time::timeout(timeout, polling)
                .await
                .map_err(|_| ContractError::ReceiptTimeout(tx_hash.to_owned()))?,
        }
    }

    async fn poll_receipt(
        &self,
        tx_hash: &str,
        poll_interval: Duration,
    ) -> Result<TransactionReceipt, ContractError> {
        loop {
            let receipt: Option<TransactionReceipt> = request_as(
                self.provider.as_ref(),
                ETH_GET_TRANSACTION_RECEIPT,
                json!([tx_hash]),
            )
            .await?;

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }

            tracing::trace!(tx_hash, "transaction pending");
            tokio::time::sleep(poll_interval).await;
        }
    }

    pub async fn owner_of(&self, token_id: U256) -> Result<Address, ContractError> {
        let output = self
            .call(ICertificateNft::ownerOfCall { tokenId: token_id }.abi_encode())
            .await?;

        Ok(Address::abi_decode(&output)?)
    }

    pub async fn token_uri(&self, token_id: U256) -> Result<String, ContractError> {
        let output = self
            .call(ICertificateNft::tokenURICall { tokenId: token_id }.abi_encode())
            .await?;

        Ok(String::abi_decode(&output)?)
    }

    async fn call(&self, data: Vec<u8>) -> Result<Vec<u8>, ContractError> {
        let output: String = request_as(
            self.provider.as_ref(),
            ETH_CALL,
            json!([
                {
                    "to": self.address,
                    "data": Bytes::from(data),
                },
                "latest"
            ]),
        )
        .await?;

        let output = hex::decode(&output).map_err(|e| ContractError::InvalidHex(e.to_string()))?;
        if output.is_empty() {
            return Err(ContractError::EmptyCallResult(self.address));
        }

        Ok(output)
    }
}

/// Parses a token id given as a decimal or `0x`-prefixed hex string.
pub fn parse_token_id(token_id: &str) -> Result<U256, ContractError> {
    let trimmed = token_id.trim();
    let (digits, radix) = match trimmed.strip_prefix("0x") {
        Some(hex_digits) => (hex_digits, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(ContractError::InvalidTokenId(token_id.to_owned()));
    }

    U256::from_str_radix(digits, radix).map_err(|_| ContractError::InvalidTokenId(token_id.to_owned()))
}

#[cfg(test)]
mod test;
