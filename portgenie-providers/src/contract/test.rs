use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{SolCall, SolValue};
use serde_json::json;

use crate::{
    contract::{
        error::ContractError,
        parse_token_id,
        receipt::{ReceiptLog, TransactionReceipt},
        CertificateContract, ICertificateNft,
    },
    eth_provider::{error::ProviderError, MockEip1193Provider},
};

const CONTRACT: &str = "0x1234567890123456789012345678901234567890";
const WALLET: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";
const TRANSFER_TOPIC: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

fn contract(provider: MockEip1193Provider) -> CertificateContract {
    CertificateContract::new(Address::from_str(CONTRACT).unwrap(), Arc::new(provider))
}

fn receipt_with_topics(topics: Vec<&str>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: "0xfeed".to_string(),
        block_number: Some("0x10".to_string()),
        status: Some("0x1".to_string()),
        logs: vec![ReceiptLog {
            address: CONTRACT.to_string(),
            topics: topics.into_iter().map(ToOwned::to_owned).collect(),
            data: "0x".to_string(),
        }],
    }
}

#[tokio::test]
async fn test_send_mint_encodes_call() {
    let wallet = Address::from_str(WALLET).unwrap();
    let expected_data = hex::encode_prefixed(
        ICertificateNft::mintCall {
            to: wallet,
            tokenURI: "ipfs://QmHash".to_string(),
        }
        .abi_encode(),
    );

    let mut provider = MockEip1193Provider::new();
    provider
        .expect_request()
        .withf(move |method, params| {
            method == "eth_sendTransaction"
                && params[0]["data"] == json!(expected_data)
                && params[0]["to"].as_str().map(str::to_lowercase) == Some(CONTRACT.to_string())
        })
        .times(1)
        .returning(|_, _| Ok(json!("0xfeed")));

    let tx_hash = contract(provider)
        .send_mint(wallet, wallet, "ipfs://QmHash")
        .await
        .unwrap();

    assert_eq!(tx_hash, "0xfeed");
}

#[tokio::test]
async fn test_send_mint_propagates_provider_error() {
    let mut provider = MockEip1193Provider::new();
    provider.expect_request().returning(|_, _| {
        Err(ProviderError::Rpc {
            code: -32000,
            message: "insufficient funds for gas * price + value".to_string(),
        })
    });

    let wallet = Address::from_str(WALLET).unwrap();
    let result = contract(provider)
        .send_mint(wallet, wallet, "ipfs://QmHash")
        .await;

    match result {
        Err(ContractError::Provider(ProviderError::Rpc { message, .. })) => {
            assert_eq!(message, "insufficient funds for gas * price + value")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_receipt_polls_until_mined() {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();

    let mut provider = MockEip1193Provider::new();
    provider
        .expect_request()
        .withf(|method, params| method == "eth_getTransactionReceipt" && params[0] == "0xfeed")
        .returning(move |_, _| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Ok(serde_json::Value::Null)
            } else {
                Ok(json!({
                    "transactionHash": "0xfeed",
                    "blockNumber": "0x10",
                    "status": "0x1",
                    "logs": []
                }))
            }
        });

    let receipt = contract(provider)
        .wait_for_receipt("0xfeed", Duration::from_millis(1), None)
        .await
        .unwrap();

    assert_eq!(receipt.transaction_hash, "0xfeed");
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_for_receipt_times_out() {
    let mut provider = MockEip1193Provider::new();
    provider
        .expect_request()
        .returning(|_, _| Ok(serde_json::Value::Null));

    let result = contract(provider)
        .wait_for_receipt(
            "0xfeed",
            Duration::from_millis(5),
            Some(Duration::from_millis(30)),
        )
        .await;

    assert!(matches!(result, Err(ContractError::ReceiptTimeout(hash)) if hash == "0xfeed"));
}

#[tokio::test]
async fn test_owner_of_decodes_address() {
    let owner = Address::from_str(WALLET).unwrap();
    let encoded = hex::encode_prefixed(owner.abi_encode());

    let mut provider = MockEip1193Provider::new();
    provider
        .expect_request()
        .withf(|method, params| {
            let expected = hex::encode_prefixed(
                ICertificateNft::ownerOfCall {
                    tokenId: U256::from(1),
                }
                .abi_encode(),
            );
            method == "eth_call" && params[0]["data"] == json!(expected) && params[1] == "latest"
        })
        .returning(move |_, _| Ok(json!(encoded)));

    let result = contract(provider).owner_of(U256::from(1)).await.unwrap();

    assert_eq!(result, owner);
}

#[tokio::test]
async fn test_token_uri_decodes_string() {
    let encoded = hex::encode_prefixed("ipfs://QmHash".to_string().abi_encode());

    let mut provider = MockEip1193Provider::new();
    provider
        .expect_request()
        .returning(move |_, _| Ok(json!(encoded)));

    let result = contract(provider).token_uri(U256::from(7)).await.unwrap();

    assert_eq!(result, "ipfs://QmHash");
}

#[tokio::test]
async fn test_call_with_empty_result_fails() {
    let mut provider = MockEip1193Provider::new();
    provider.expect_request().returning(|_, _| Ok(json!("0x")));

    let result = contract(provider).owner_of(U256::from(1)).await;

    assert!(matches!(result, Err(ContractError::EmptyCallResult(_))));
}

#[test]
fn test_minted_token_id_from_fourth_topic() {
    let receipt = receipt_with_topics(vec![
        TRANSFER_TOPIC,
        "0x0000000000000000000000000000000000000000000000000000000000000000",
        "0x000000000000000000000000abcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "0x0000000000000000000000000000000000000000000000000000000000000001",
    ]);

    assert_eq!(receipt.minted_token_id().unwrap().to_string(), "1");
    // same log, same id
    assert_eq!(receipt.minted_token_id().unwrap().to_string(), "1");
}

#[test]
fn test_minted_token_id_keeps_full_precision() {
    let receipt = receipt_with_topics(vec![
        TRANSFER_TOPIC,
        "0x0000000000000000000000000000000000000000000000000000000000000000",
        "0x000000000000000000000000abcdefabcdefabcdefabcdefabcdefabcdefabcd",
        "0x000000000000000000000000000000000000000000000000ffffffffffffffff",
    ]);

    assert_eq!(
        receipt.minted_token_id().unwrap().to_string(),
        "18446744073709551615"
    );
}

#[test]
fn test_minted_token_id_rejects_unexpected_logs() {
    let no_logs = TransactionReceipt {
        logs: vec![],
        ..receipt_with_topics(vec![])
    };
    let short_log = receipt_with_topics(vec![TRANSFER_TOPIC, "0x00"]);
    let empty_topic = receipt_with_topics(vec![TRANSFER_TOPIC, "0x00", "0x00", "0x"]);

    assert!(matches!(
        no_logs.minted_token_id(),
        Err(ContractError::UnexpectedReceiptLogs(_))
    ));
    assert!(matches!(
        short_log.minted_token_id(),
        Err(ContractError::UnexpectedReceiptLogs(_))
    ));
    assert!(matches!(
        empty_topic.minted_token_id(),
        Err(ContractError::UnexpectedReceiptLogs(_))
    ));
}

#[test]
fn test_reverted_receipt() {
    let mut receipt = receipt_with_topics(vec![]);
    assert!(!receipt.is_reverted());

    receipt.status = Some("0x0".to_string());
    assert!(receipt.is_reverted());
}

#[test]
fn test_parse_token_id() {
    assert_eq!(parse_token_id("1").unwrap(), U256::from(1));
    assert_eq!(parse_token_id("0x0a").unwrap(), U256::from(10));
    assert!(matches!(
        parse_token_id("one"),
        Err(ContractError::InvalidTokenId(_))
    ));
    for empty in ["", "  ", "0x"] {
        assert!(matches!(
            parse_token_id(empty),
            Err(ContractError::InvalidTokenId(_))
        ));
    }
}
