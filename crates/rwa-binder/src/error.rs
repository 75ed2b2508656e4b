//! Error types for the binding layer

use rwa_checksum::ChecksumError;
use rwa_greenfield::GreenfieldError;
use rwa_registry::RegistryError;
use rwa_types::PolicyError;
use thiserror::Error;

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, BinderError>;

/// Errors from the write path and reconciliation
#[derive(Debug, Error)]
pub enum BinderError {
    /// Payload rejected by the local policy gate
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Checksum computation or checksum-set handling failed
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// Registry read or write failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Storage network operation failed
    #[error(transparent)]
    Store(#[from] GreenfieldError),

    /// Payload serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote proxy service reported a failure
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// An object's recomputed hash does not match its registry
    /// descriptor. During bucket reconciliation this is recorded and the
    /// object skipped; only single-object verification surfaces it.
    #[error("Registry hash {registry_hash} does not match object hash {object_hash} for {object_name}")]
    HashMismatch {
        object_name: String,
        registry_hash: String,
        object_hash: String,
    },

    /// An object's name does not match its registry descriptor
    #[error("Registry object name {registered_name} does not match listed name {object_name}")]
    NameMismatch {
        object_name: String,
        registered_name: String,
    },
}
