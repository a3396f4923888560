use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::{hex, Address};
use alloy_sol_types::SolValue;
use portgenie_providers::common_models::credential::CredentialType;
use portgenie_providers::eth_provider::MockEip1193Provider;
use portgenie_providers::http_client::imp::reqwest_client::ReqwestClient;
use portgenie_providers::network::Network;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{
    config::PortGenieConfig,
    model::CredentialFields,
    service::error::{VerificationServiceError, WalletServiceError},
    PortGenieCore,
};

const CONTRACT: &str = "0x1234567890123456789012345678901234567890";
const OWNER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

fn encoded_owner() -> String {
    hex::encode_prefixed(Address::from_str(OWNER).unwrap().abi_encode())
}

#[tokio::test]
async fn test_default_core_uses_in_memory_storage() {
    let core = PortGenieCore::default();

    core.credential_service
        .record(
            "user-1",
            CredentialFields {
                wallet_address: OWNER.to_string(),
                blockchain: "ethereum".to_string(),
                credential_type: CredentialType::Resume,
                entity_id: "r-1".to_string(),
                transaction_hash: "0xfeed".to_string(),
                contract_address: CONTRACT.to_string(),
                token_id: "3".to_string(),
                metadata_uri: "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".to_string(),
            },
        )
        .await
        .unwrap();

    let credentials = core.credential_service.list_for_user("user-1").await.unwrap();
    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0].token_id, "3");
}

#[tokio::test]
async fn test_core_without_wallet() {
    let core = PortGenieCore::default();

    assert!(matches!(
        core.wallet_service.connect().await,
        Err(WalletServiceError::ProviderNotFound { .. })
    ));
    assert!(matches!(
        core.verification_service
            .verify_ownership(CONTRACT, "1", OWNER)
            .await,
        Err(VerificationServiceError::ProviderNotFound)
    ));
}

#[test]
fn test_explorer_follows_configured_network() {
    let mut config = PortGenieConfig::default();
    config.ethereum_config.network = Network::Polygon;

    let core = PortGenieCore::new(Some(config), Arc::new(ReqwestClient::default()), None);

    assert_eq!(core.network(), Network::Polygon);
    assert_eq!(
        core.explorer().transaction_url("0xfeed"),
        "https://polygonscan.com/tx/0xfeed"
    );
}

#[tokio::test]
async fn test_reads_fall_back_to_wallet() {
    let mut wallet = MockEip1193Provider::new();
    wallet
        .expect_request()
        .withf(|method, _| method == "eth_call")
        .times(1)
        .returning(|_, _| Ok(json!(encoded_owner())));

    let core = PortGenieCore::new(
        None,
        Arc::new(ReqwestClient::default()),
        Some(Arc::new(wallet)),
    );

    let result = core
        .verification_service
        .verify_ownership(CONTRACT, "1", OWNER)
        .await
        .unwrap();

    assert!(result.is_owner);
}

#[tokio::test]
async fn test_reads_use_configured_node() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc"))
        .and(body_partial_json(json!({ "method": "eth_call" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": encoded_owner()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut wallet = MockEip1193Provider::new();
    wallet.expect_request().times(0);

    let mut config = PortGenieConfig::default();
    config.ethereum_config.rpc_url = Some(format!("{}/rpc", mock_server.uri()));

    let core = PortGenieCore::new(
        Some(config),
        Arc::new(ReqwestClient::default()),
        Some(Arc::new(wallet)),
    );

    let result = core
        .verification_service
        .verify_ownership(CONTRACT, "1", "0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD")
        .await
        .unwrap();

    assert!(result.is_owner);
}
