use std::str::FromStr;
use std::time::Duration;

use envconfig::Envconfig;
use portgenie_providers::common_models::credential::DEFAULT_BLOCKCHAIN;
use portgenie_providers::ipfs::imp::pinata::{
    PinataCredentials, DEFAULT_API_URL, DEFAULT_GATEWAY_URL,
};
use portgenie_providers::network::Network;
use thiserror::Error;
use zeroize::Zeroizing;

pub struct PortGenieConfig {
    pub pinata_config: PinataConfig,
    pub ethereum_config: EthereumConfig,
    pub storage_config: StorageConfig,
    pub mint_config: MintConfig,
}

pub struct PinataConfig {
    pub api_url: String,
    pub gateway_url: String,
    pub credentials: Option<PinataCredentials>,
}

pub struct EthereumConfig {
    pub network: Network,
    /// Read-only JSON-RPC endpoint; the wallet is used for reads when unset.
    pub rpc_url: Option<String>,
}

pub struct StorageConfig {
    /// In-memory storage when unset.
    pub supabase: Option<SupabaseConfig>,
}

pub struct SupabaseConfig {
    pub url: String,
    pub api_key: Zeroizing<String>,
}

#[derive(Clone, Debug)]
pub struct MintConfig {
    pub blockchain: String,
    pub receipt_poll_interval: Duration,
    /// `None` waits for as long as the transaction stays pending.
    pub receipt_timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment error: `{0}`")]
    Env(#[from] envconfig::Error),
    #[error("Unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("Incomplete configuration: {0}")]
    Incomplete(&'static str),
}

impl Default for PortGenieConfig {
    fn default() -> Self {
        Self {
            pinata_config: PinataConfig {
                api_url: DEFAULT_API_URL.to_string(),
                gateway_url: DEFAULT_GATEWAY_URL.to_string(),
                credentials: None,
            },
            ethereum_config: EthereumConfig {
                network: Network::Mainnet,
                rpc_url: None,
            },
            storage_config: StorageConfig { supabase: None },
            mint_config: MintConfig::default(),
        }
    }
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            blockchain: DEFAULT_BLOCKCHAIN.to_string(),
            receipt_poll_interval: Duration::from_secs(1),
            receipt_timeout: None,
        }
    }
}

#[derive(Debug, Envconfig)]
struct EnvVars {
    #[envconfig(from = "PINATA_API_URL")]
    pinata_api_url: Option<String>,
    #[envconfig(from = "PINATA_GATEWAY")]
    pinata_gateway: Option<String>,
    #[envconfig(from = "PINATA_API_KEY")]
    pinata_api_key: Option<String>,
    #[envconfig(from = "PINATA_SECRET_API_KEY")]
    pinata_secret_api_key: Option<String>,
    #[envconfig(from = "PINATA_JWT")]
    pinata_jwt: Option<String>,
    #[envconfig(from = "ETHEREUM_NETWORK", default = "mainnet")]
    ethereum_network: String,
    #[envconfig(from = "ETHEREUM_PROVIDER_URL")]
    ethereum_provider_url: Option<String>,
    #[envconfig(from = "SUPABASE_URL")]
    supabase_url: Option<String>,
    #[envconfig(from = "SUPABASE_KEY")]
    supabase_key: Option<String>,
    #[envconfig(from = "RECEIPT_POLL_INTERVAL_MS", default = "1000")]
    receipt_poll_interval_ms: u64,
    #[envconfig(from = "RECEIPT_TIMEOUT_MS")]
    receipt_timeout_ms: Option<u64>,
}

impl PortGenieConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::try_from(EnvVars::init_from_env()?)
    }
}

impl TryFrom<EnvVars> for PortGenieConfig {
    type Error = ConfigError;

    fn try_from(vars: EnvVars) -> Result<Self, Self::Error> {
        let network = Network::from_str(&vars.ethereum_network)
            .map_err(|_| ConfigError::UnknownNetwork(vars.ethereum_network.clone()))?;

        // a JWT takes precedence over the key pair
        let credentials = match (
            vars.pinata_jwt,
            vars.pinata_api_key,
            vars.pinata_secret_api_key,
        ) {
            (Some(jwt), _, _) => Some(PinataCredentials::Jwt(Zeroizing::new(jwt))),
            (None, Some(api_key), Some(secret)) => Some(PinataCredentials::ApiKey {
                api_key,
                secret_api_key: Zeroizing::new(secret),
            }),
            (None, Some(_), None) => {
                return Err(ConfigError::Incomplete(
                    "PINATA_API_KEY is set without PINATA_SECRET_API_KEY",
                ))
            }
            (None, None, Some(_)) => {
                return Err(ConfigError::Incomplete(
                    "PINATA_SECRET_API_KEY is set without PINATA_API_KEY",
                ))
            }
            (None, None, None) => None,
        };

        let supabase = match (vars.supabase_url, vars.supabase_key) {
            (Some(url), Some(key)) => Some(SupabaseConfig {
                url,
                api_key: Zeroizing::new(key),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Incomplete(
                    "SUPABASE_URL and SUPABASE_KEY must be set together",
                ))
            }
        };

        Ok(Self {
            pinata_config: PinataConfig {
                api_url: vars
                    .pinata_api_url
                    .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
                gateway_url: vars
                    .pinata_gateway
                    .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_owned()),
                credentials,
            },
            ethereum_config: EthereumConfig {
                network,
                rpc_url: vars.ethereum_provider_url,
            },
            storage_config: StorageConfig { supabase },
            mint_config: MintConfig {
                blockchain: DEFAULT_BLOCKCHAIN.to_string(),
                receipt_poll_interval: Duration::from_millis(vars.receipt_poll_interval_ms),
                receipt_timeout: vars.receipt_timeout_ms.map(Duration::from_millis),
            },
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<PortGenieConfig, ConfigError> {
        PortGenieConfig::try_from(EnvVars::init_from_hashmap(&vars(pairs))?)
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = load(&[]).unwrap();

        assert_eq!(config.pinata_config.api_url, DEFAULT_API_URL);
        assert_eq!(config.pinata_config.gateway_url, DEFAULT_GATEWAY_URL);
        assert!(config.pinata_config.credentials.is_none());
        assert_eq!(config.ethereum_config.network, Network::Mainnet);
        assert!(config.ethereum_config.rpc_url.is_none());
        assert!(config.storage_config.supabase.is_none());
        assert_eq!(
            config.mint_config.receipt_poll_interval,
            Duration::from_secs(1)
        );
        assert!(config.mint_config.receipt_timeout.is_none());
    }

    #[test]
    fn test_full_environment() {
        let config = load(&[
            ("PINATA_API_KEY", "key"),
            ("PINATA_SECRET_API_KEY", "secret"),
            ("ETHEREUM_NETWORK", "polygon"),
            ("ETHEREUM_PROVIDER_URL", "https://polygon-rpc.com/"),
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_KEY", "anon"),
            ("RECEIPT_POLL_INTERVAL_MS", "250"),
            ("RECEIPT_TIMEOUT_MS", "60000"),
        ])
        .unwrap();

        assert!(matches!(
            config.pinata_config.credentials,
            Some(PinataCredentials::ApiKey { ref api_key, .. }) if api_key == "key"
        ));
        assert_eq!(config.ethereum_config.network, Network::Polygon);
        assert_eq!(
            config.ethereum_config.rpc_url.as_deref(),
            Some("https://polygon-rpc.com/")
        );
        let supabase = config.storage_config.supabase.unwrap();
        assert_eq!(supabase.url, "https://project.supabase.co");
        assert_eq!(supabase.api_key.as_str(), "anon");
        assert_eq!(
            config.mint_config.receipt_poll_interval,
            Duration::from_millis(250)
        );
        assert_eq!(
            config.mint_config.receipt_timeout,
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_pinata_urls_override_defaults() {
        let config = load(&[
            ("PINATA_API_URL", "http://localhost:3000"),
            ("PINATA_GATEWAY", "https://example.mypinata.cloud/ipfs/"),
        ])
        .unwrap();

        assert_eq!(config.pinata_config.api_url, "http://localhost:3000");
        assert_eq!(
            config.pinata_config.gateway_url,
            "https://example.mypinata.cloud/ipfs/"
        );
    }

    #[test]
    fn test_jwt_takes_precedence() {
        let config = load(&[("PINATA_JWT", "token"), ("PINATA_API_KEY", "key")]).unwrap();

        assert!(matches!(
            config.pinata_config.credentials,
            Some(PinataCredentials::Jwt(_))
        ));
    }

    #[test]
    fn test_incomplete_and_invalid_values() {
        assert!(matches!(
            load(&[("PINATA_API_KEY", "key")]),
            Err(ConfigError::Incomplete(_))
        ));
        assert!(matches!(
            load(&[("SUPABASE_URL", "https://project.supabase.co")]),
            Err(ConfigError::Incomplete(_))
        ));
        assert!(matches!(
            load(&[("ETHEREUM_NETWORK", "ropsten")]),
            Err(ConfigError::UnknownNetwork(network)) if network == "ropsten"
        ));
        assert!(matches!(
            load(&[("RECEIPT_POLL_INTERVAL_MS", "soon")]),
            Err(ConfigError::Env(_))
        ));
    }
}
