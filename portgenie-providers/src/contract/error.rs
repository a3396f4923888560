use alloy_primitives::Address;
use thiserror::Error;

use crate::eth_provider::error::ProviderError;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Provider error: `{0}`")]
    Provider(#[from] ProviderError),
    #[error("ABI decoding error: `{0}`")]
    AbiDecode(#[from] alloy_sol_types::Error),
    #[error("Invalid hex payload: `{0}`")]
    InvalidHex(String),
    #[error("Invalid token id: `{0}`")]
    InvalidTokenId(String),
    #[error("Contract `{0}` returned no data")]
    EmptyCallResult(Address),
    #[error("Unexpected receipt logs: {0}")]
    UnexpectedReceiptLogs(String),
    #[error("Transaction `{0}` reverted")]
    TransactionReverted(String),
    #[error("Timed out waiting for receipt of `{0}`")]
    ReceiptTimeout(String),
}
