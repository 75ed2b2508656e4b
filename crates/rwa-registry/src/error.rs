//! Error types for the registry client

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur against the on-chain registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The asset does not exist or has no storage contract
    #[error("Asset {0} does not exist or has no storage contract")]
    NoStorageContract(String),

    /// Contract call (read operation) failed
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// The content hash is already registered for this asset
    #[error("Content hash {0} is already registered")]
    DuplicateHash(String),

    /// First descriptor for an asset must be category ISSUER, type CONTRACT
    #[error("First descriptor for an asset must be ISSUER/CONTRACT, got {category}/{doc_type}")]
    FirstDescriptorNotIssuer {
        category: String,
        doc_type: String,
    },

    /// No descriptor is registered for the given hash
    #[error("No descriptor registered for hash {0}")]
    DescriptorNotFound(String),

    /// A registry value could not be mapped to a known category or type
    #[error("Unmapped registry value: {0}")]
    UnmappedValue(String),

    /// A registry-issued name is outside the storage network charset even
    /// after sanitization
    #[error("Invalid object name: {0}")]
    InvalidName(String),

    /// Fee quote lookup failed
    #[error("Fee quote failed: {0}")]
    FeeQuote(String),

    /// Descriptor submission failed (reverted or not included)
    #[error("Registry write failed: {0}")]
    RegistryWrite(String),

    /// Fee-token approval transaction failed
    #[error("Fee approval failed: {0}")]
    FeeApproval(String),

    /// No private key configured for write operations
    #[error("No private key configured - write operations require private_key in config")]
    NoPrivateKey,

    /// Provider creation or connection error
    #[error("Provider error: {0}")]
    ProviderError(String),
}

impl RegistryError {
    /// Whether the operation may be retried by the caller.
    ///
    /// Duplicate hashes and ordering violations are permanent; transport
    /// and call failures are transient.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::ContractCall(_) | Self::FeeQuote(_) | Self::ProviderError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retriable() {
        assert!(RegistryError::ContractCall("timeout".to_string()).is_retriable());
        assert!(!RegistryError::DuplicateHash("0xab".to_string()).is_retriable());
        assert!(!RegistryError::NoPrivateKey.is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = RegistryError::FirstDescriptorNotIssuer {
            category: "NOTICE".to_string(),
            doc_type: "CONTRACT".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "First descriptor for an asset must be ISSUER/CONTRACT, got NOTICE/CONTRACT"
        );
    }
}
