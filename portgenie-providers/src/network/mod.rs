//! Catalogue of the networks the wallet can be switched to, with block
//! explorer link templates.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    Mainnet,
    Goerli,
    Sepolia,
    Polygon,
    Mumbai,
}

/// `wallet_addEthereumChain` parameters (EIP-3085).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Goerli => 5,
            Self::Sepolia => 11_155_111,
            Self::Polygon => 137,
            Self::Mumbai => 80_001,
        }
    }

    /// Chain id in the `0x`-prefixed form used by wallet RPC methods.
    pub fn hex_chain_id(&self) -> String {
        format!("{:#x}", self.chain_id())
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::iter().find(|network| network.chain_id() == chain_id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "Ethereum Mainnet",
            Self::Goerli => "Goerli Testnet",
            Self::Sepolia => "Sepolia Testnet",
            Self::Polygon => "Polygon Mainnet",
            Self::Mumbai => "Mumbai Testnet",
        }
    }

    pub fn explorer_base_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://etherscan.io",
            Self::Goerli => "https://goerli.etherscan.io",
            Self::Sepolia => "https://sepolia.etherscan.io",
            Self::Polygon => "https://polygonscan.com",
            Self::Mumbai => "https://mumbai.polygonscan.com",
        }
    }

    /// Parameters for adding the chain to a wallet that does not know it.
    /// Only the Polygon networks are offered; Ethereum networks ship with every wallet.
    pub fn add_chain_params(&self) -> Option<AddChainParams> {
        let (chain_name, rpc_url) = match self {
            Self::Polygon => ("Polygon Mainnet", "https://polygon-rpc.com/"),
            Self::Mumbai => ("Mumbai Testnet", "https://rpc-mumbai.maticvigil.com/"),
            _ => return None,
        };

        Some(AddChainParams {
            chain_id: self.hex_chain_id(),
            chain_name: chain_name.to_owned(),
            native_currency: NativeCurrency {
                name: "MATIC".to_owned(),
                symbol: "MATIC".to_owned(),
                decimals: 18,
            },
            rpc_urls: vec![rpc_url.to_owned()],
            block_explorer_urls: vec![format!("{}/", self.explorer_base_url())],
        })
    }
}

/// Parses a chain id given as `0x`-prefixed hex (wallet form) or decimal.
pub fn parse_chain_id(value: &str) -> Option<u64> {
    match value.strip_prefix("0x") {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Block explorer link builder. Unknown networks link to Etherscan mainnet.
#[derive(Debug, Clone, Copy)]
pub struct Explorer {
    base_url: &'static str,
}

impl Explorer {
    pub fn for_network(network: Option<Network>) -> Self {
        Self {
            base_url: network.unwrap_or(Network::Mainnet).explorer_base_url(),
        }
    }

    pub fn transaction_url(&self, transaction_hash: &str) -> String {
        format!("{}/tx/{transaction_hash}", self.base_url)
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{address}", self.base_url)
    }

    pub fn token_url(&self, contract_address: &str, token_id: &str) -> String {
        format!("{}/token/{contract_address}?a={token_id}", self.base_url)
    }
}

#[cfg(test)]
mod test;
