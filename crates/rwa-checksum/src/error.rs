//! Error types for checksum computation

use thiserror::Error;

/// Errors from checksum computation or checksum-set handling
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// The payload cannot be erasure-coded (empty, oversized, or the
    /// encoder rejected the shard layout)
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// A reported checksum set is malformed (wrong cardinality or
    /// undecodable base64)
    #[error("invalid checksum set: {0}")]
    InvalidSet(String),
}
