//! Configuration for the registry client
//!
//! Per-chain contract addresses live in one table keyed by chain id,
//! validated at startup rather than at each call site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Addresses and endpoint for one chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// RPC URL for the chain's node
    pub rpc_url: String,

    /// Asset-id to storage-contract map
    pub map_address: String,

    /// Storage manager (descriptor writes, fee spender)
    pub storage_manager_address: String,

    /// Fee manager (cross-chain fee quotes)
    pub fee_manager_address: String,

    /// Default fee token for descriptor writes
    pub fee_token_address: String,
}

/// Registry client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Per-chain address tables, keyed by decimal chain id
    pub chains: HashMap<String, ChainConfig>,

    /// Private key for signing transactions (optional for read-only use).
    /// Never logged.
    pub private_key: Option<String>,

    /// Asset family selector passed to the map contract
    #[serde(default = "default_rwa_type")]
    pub rwa_type: u64,

    /// Asset family version passed to the map contract
    #[serde(default = "default_version")]
    pub version: u64,
}

fn default_rwa_type() -> u64 {
    1
}

fn default_version() -> u64 {
    1
}

fn validate_address(name: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} cannot be empty", name));
    }
    if !value.starts_with("0x") {
        return Err(format!("{} must start with 0x", name));
    }
    if value.len() != 42 {
        return Err(format!(
            "{} must be 42 characters (0x + 40 hex), got {}",
            name,
            value.len()
        ));
    }
    if !value[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{} must contain only hex characters after 0x", name));
    }
    Ok(())
}

impl RegistryConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self, anyhow::Error> {
        let config: Self = toml::from_str(toml)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Returns `Ok(())` if valid, otherwise returns error message
    pub fn validate(&self) -> Result<(), String> {
        if self.chains.is_empty() {
            return Err("at least one chain must be configured".to_string());
        }

        for (chain_id, chain) in &self.chains {
            if chain_id.is_empty() || !chain_id.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("chain id '{}' must be a decimal number", chain_id));
            }

            if !chain.rpc_url.starts_with("http://") && !chain.rpc_url.starts_with("https://") {
                return Err(format!(
                    "rpc_url for chain {} must start with http:// or https://",
                    chain_id
                ));
            }

            validate_address("map_address", &chain.map_address)?;
            validate_address("storage_manager_address", &chain.storage_manager_address)?;
            validate_address("fee_manager_address", &chain.fee_manager_address)?;
            validate_address("fee_token_address", &chain.fee_token_address)?;
        }

        if let Some(ref pk) = self.private_key {
            if !pk.is_empty() {
                if !pk.starts_with("0x") {
                    return Err("private_key must start with 0x".to_string());
                }
                if pk.len() != 66 {
                    return Err(format!(
                        "private_key must be 66 characters (0x + 64 hex), got {}",
                        pk.len()
                    ));
                }
                if !pk[2..].chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err("private_key must contain only hex characters after 0x".to_string());
                }
            }
        }

        Ok(())
    }

    /// Address table for one chain
    pub fn chain(&self, chain_id: &str) -> Option<&ChainConfig> {
        self.chains.get(chain_id)
    }

    /// Check if configuration supports write operations (has private key)
    pub fn can_write(&self) -> bool {
        self.private_key.as_deref().is_some_and(|pk| !pk.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1234567890123456789012345678901234567890";

    fn test_chain() -> ChainConfig {
        ChainConfig {
            rpc_url: "https://rpc.example.org".to_string(),
            map_address: ADDR.to_string(),
            storage_manager_address: ADDR.to_string(),
            fee_manager_address: ADDR.to_string(),
            fee_token_address: ADDR.to_string(),
        }
    }

    fn test_config() -> RegistryConfig {
        let mut chains = HashMap::new();
        chains.insert("97".to_string(), test_chain());
        RegistryConfig {
            chains,
            private_key: None,
            rwa_type: 1,
            version: 1,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_empty_chains_rejected() {
        let config = RegistryConfig {
            chains: HashMap::new(),
            private_key: None,
            rwa_type: 1,
            version: 1,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rpc_scheme() {
        let mut config = test_config();
        config.chains.get_mut("97").unwrap().rpc_url = "ws://rpc.example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_address_length() {
        let mut config = test_config();
        config.chains.get_mut("97").unwrap().map_address = "0x1234".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_numeric_chain_id() {
        let mut config = test_config();
        let chain = config.chains.remove("97").unwrap();
        config.chains.insert("mainnet".to_string(), chain);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_private_key_validation() {
        let mut config = test_config();

        config.private_key = Some("0x1234".to_string());
        assert!(config.validate().is_err());

        config.private_key =
            Some("0x1234567890123456789012345678901234567890123456789012345678901234".to_string());
        assert!(config.validate().is_ok());
        assert!(config.can_write());
    }

    #[test]
    fn test_can_write_empty_key() {
        let mut config = test_config();
        assert!(!config.can_write());
        config.private_key = Some(String::new());
        assert!(!config.can_write());
    }

    #[test]
    fn test_from_toml_str() {
        let toml = format!(
            r#"
[chains.97]
rpc_url = "https://data-seed-prebsc-1-s1.bnbchain.org:8545"
map_address = "{ADDR}"
storage_manager_address = "{ADDR}"
fee_manager_address = "{ADDR}"
fee_token_address = "{ADDR}"
"#
        );
        let config = RegistryConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.rwa_type, 1);
        assert_eq!(config.version, 1);
        assert!(config.chain("97").is_some());
        assert!(config.chain("1").is_none());
    }
}
