//! Service configuration

use rwa_greenfield::GreenfieldConfig;
use rwa_registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// How the write path reaches the storage network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStrategyKind {
    /// Storage network client in-process
    #[default]
    Direct,
    /// Proxy every write through a companion service
    Remote,
}

/// Storage network section of the service config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreenfieldSection {
    /// Gateway URL; falls back to the GREENFIELD_GATEWAY env var
    pub gateway_url: Option<String>,

    /// Storage-provider endpoint filter
    pub provider_filter: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GreenfieldSection {
    pub fn to_client_config(&self) -> GreenfieldConfig {
        let mut config = GreenfieldConfig::default();
        if let Some(ref gateway_url) = self.gateway_url {
            config.gateway_url = gateway_url.clone();
        }
        if self.provider_filter.is_some() {
            config.provider_filter = self.provider_filter.clone();
        }
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Chain this service instance is bound to (decimal chain id)
    pub chain_id: String,

    /// Write-path strategy
    #[serde(default)]
    pub strategy: WriteStrategyKind,

    /// Companion service URL, required for the remote strategy
    pub proxy_url: Option<String>,

    pub registry: RegistryConfig,

    #[serde(default)]
    pub greenfield: GreenfieldSection,
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, anyhow::Error> {
        let config: Self = toml::from_str(toml)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.registry.validate()?;

        if self.registry.chain(&self.chain_id).is_none() {
            return Err(format!(
                "chain_id {} has no entry in the registry chain table",
                self.chain_id
            ));
        }

        if self.strategy == WriteStrategyKind::Remote && self.proxy_url.is_none() {
            return Err("remote strategy requires proxy_url".to_string());
        }

        if self.greenfield.timeout_secs == 0 {
            return Err("greenfield.timeout_secs must be > 0".to_string());
        }

        Ok(())
    }
}
