//! Subset of the `eth_getTransactionReceipt` response used by the minter.

use alloy_primitives::U256;
use serde::Deserialize;

use crate::contract::error::ContractError;

const STATUS_REVERTED: &str = "0x0";
const TOKEN_ID_TOPIC: usize = 3;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ReceiptLog {
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts carry no status and count as successful.
    pub fn is_reverted(&self) -> bool {
        self.status.as_deref() == Some(STATUS_REVERTED)
    }

    /// Token id minted by this transaction.
    ///
    /// Read from the 4th topic of the first log, i.e. the `tokenId` of an
    /// ERC-721 `Transfer(from, to, tokenId)` emitted first by the mint. Any
    /// other log shape is reported, not guessed around.
    pub fn minted_token_id(&self) -> Result<U256, ContractError> {
        let log = self.logs.first().ok_or_else(|| {
            ContractError::UnexpectedReceiptLogs(format!(
                "transaction `{}` emitted no logs",
                self.transaction_hash
            ))
        })?;

        let topic = log.topics.get(TOKEN_ID_TOPIC).ok_or_else(|| {
            ContractError::UnexpectedReceiptLogs(format!(
                "first log has {} topics, expected at least {}",
                log.topics.len(),
                TOKEN_ID_TOPIC + 1
            ))
        })?;

        let digits = topic.strip_prefix("0x").unwrap_or(topic);
        if digits.is_empty() {
            return Err(ContractError::UnexpectedReceiptLogs(format!(
                "topic `{topic}` carries no token id"
            )));
        }
        U256::from_str_radix(digits, 16).map_err(|_| {
            ContractError::UnexpectedReceiptLogs(format!("topic `{topic}` is not a hex integer"))
        })
    }
}
