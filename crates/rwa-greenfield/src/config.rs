//! Configuration for the storage network client

use std::env;
use std::time::Duration;

/// Default request timeout. Some storage providers are slow; callers
/// that need tighter deadlines configure their own.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Storage network client configuration
#[derive(Debug, Clone)]
pub struct GreenfieldConfig {
    /// Transaction-signing gateway for mutating operations
    pub gateway_url: String,

    /// Only use storage providers whose endpoint contains this
    /// substring. `None` accepts every provider.
    pub provider_filter: Option<String>,

    /// Request timeout applied to every network call
    pub timeout: Duration,
}

impl Default for GreenfieldConfig {
    fn default() -> Self {
        Self {
            gateway_url: env::var("GREENFIELD_GATEWAY")
                .unwrap_or_else(|_| "http://127.0.0.1:26660".to_string()),
            provider_filter: env::var("GREENFIELD_SP_FILTER").ok(),
            timeout: Duration::from_secs(
                env::var("GREENFIELD_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }
}

impl GreenfieldConfig {
    pub fn with_gateway(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            ..Default::default()
        }
    }
}
