//! Error types for the storage network client

use thiserror::Error;

/// Result type alias for storage network operations
pub type Result<T> = std::result::Result<T, GreenfieldError>;

/// Errors from the storage network
///
/// "Not found" outcomes are their own variants so callers can
/// distinguish the expected absence (which triggers creation or a clean
/// miss) from a lookup that actually failed.
#[derive(Debug, Error)]
pub enum GreenfieldError {
    /// The bucket does not exist. Expected on first write; triggers
    /// creation.
    #[error("Bucket {0} does not exist")]
    BucketNotFound(String),

    /// Bucket metadata lookup failed for a reason other than absence
    #[error("Bucket lookup failed for {0}: {1}")]
    BucketLookup(String, String),

    /// The object does not exist
    #[error("Object {0} does not exist")]
    ObjectNotFound(String),

    /// An object with this name already exists
    #[error("Object {0} already exists")]
    ObjectAlreadyExists(String),

    /// Upload finished with a status that is neither success nor the
    /// benign already-exists code
    #[error("Upload of {object_name} failed with code {code}: {message}")]
    UploadFailed {
        object_name: String,
        code: i64,
        message: String,
    },

    /// No storage provider survived the configured filter
    #[error("No storage provider available: {0}")]
    NoProvider(String),

    /// Transport-level failure talking to the gateway or a provider
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// The gateway answered with a body this client cannot interpret
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GreenfieldError {
    fn from(e: reqwest::Error) -> Self {
        Self::Gateway(e.to_string())
    }
}
