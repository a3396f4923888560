use std::str::FromStr;

use crate::network::{parse_chain_id, Explorer, Network};

#[test]
fn test_chain_ids() {
    let test_cases = vec![
        (Network::Mainnet, "0x1"),
        (Network::Goerli, "0x5"),
        (Network::Sepolia, "0xaa36a7"),
        (Network::Polygon, "0x89"),
        (Network::Mumbai, "0x13881"),
    ];

    for (network, hex_chain_id) in test_cases {
        assert_eq!(network.hex_chain_id(), hex_chain_id);
        assert_eq!(
            Network::from_chain_id(parse_chain_id(hex_chain_id).unwrap()),
            Some(network)
        );
    }
}

#[test]
fn test_unknown_chain() {
    assert_eq!(Network::from_chain_id(31337), None);
    assert_eq!(parse_chain_id("0xzz"), None);
    assert_eq!(parse_chain_id("137"), Some(137));
}

#[test]
fn test_network_names_parse() {
    assert_eq!(Network::from_str("sepolia").unwrap(), Network::Sepolia);
    assert_eq!(Network::Polygon.to_string(), "polygon");
    assert!(Network::from_str("ropsten").is_err());
}

#[test]
fn test_transaction_urls() {
    let test_cases = vec![
        (Some(Network::Mainnet), "https://etherscan.io/tx/0xabc"),
        (Some(Network::Goerli), "https://goerli.etherscan.io/tx/0xabc"),
        (Some(Network::Sepolia), "https://sepolia.etherscan.io/tx/0xabc"),
        (Some(Network::Polygon), "https://polygonscan.com/tx/0xabc"),
        (Some(Network::Mumbai), "https://mumbai.polygonscan.com/tx/0xabc"),
        (None, "https://etherscan.io/tx/0xabc"),
    ];

    for (network, expected) in test_cases {
        assert_eq!(Explorer::for_network(network).transaction_url("0xabc"), expected);
    }
}

#[test]
fn test_address_and_token_urls() {
    let explorer = Explorer::for_network(Some(Network::Polygon));

    assert_eq!(
        explorer.address_url("0x1234"),
        "https://polygonscan.com/address/0x1234"
    );
    assert_eq!(
        explorer.token_url("0x1234", "7"),
        "https://polygonscan.com/token/0x1234?a=7"
    );
}

#[test]
fn test_add_chain_params() {
    let params = Network::Polygon.add_chain_params().unwrap();
    assert_eq!(params.chain_id, "0x89");
    assert_eq!(params.rpc_urls, vec!["https://polygon-rpc.com/".to_string()]);
    assert_eq!(
        params.block_explorer_urls,
        vec!["https://polygonscan.com/".to_string()]
    );

    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["chainName"], "Polygon Mainnet");
    assert_eq!(json["nativeCurrency"]["decimals"], 18);

    assert!(Network::Sepolia.add_chain_params().is_none());
}
