//! Segmented Reed-Solomon redundancy checksums
//!
//! Payloads are split into fixed-size segments; each segment is erasure
//! coded into 4 data + 2 parity shards. The checksum set has one entry
//! per shard index (SHA-256 over the concatenated per-segment shard
//! digests) plus a primary entry (SHA-256 over the concatenated
//! per-segment digests), 7 entries total. These parameters mirror the
//! storage network's redundancy scheme and are part of the wire format.

use crate::error::ChecksumError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reed_solomon_erasure::galois_8::ReedSolomon;
use sha2::{Digest, Sha256};

/// Segment size the storage network erasure codes over (16 MiB)
pub const SEGMENT_SIZE: usize = 16 * 1024 * 1024;

/// Data shards per segment
pub const DATA_SHARDS: usize = 4;

/// Parity shards per segment
pub const PARITY_SHARDS: usize = 2;

/// Cardinality of the checksum set: primary + one per shard index
pub const CHECKSUM_COUNT: usize = 1 + DATA_SHARDS + PARITY_SHARDS;

/// Largest payload the encoder accepts. Matches the largest category
/// ceiling so any policy-approved payload can be encoded.
pub const MAX_ENCODE_SIZE: u64 = 50_000_000_000;

/// Ordered set of redundancy checksums for one payload.
///
/// Order is protocol-fixed: index 0 is the primary checksum, indices
/// 1..=6 are the per-shard piece checksums. The content hash is derived
/// over this exact order, so reordering the set changes the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumSet {
    checksums: Vec<String>,
}

impl ChecksumSet {
    /// Build from raw 32-byte digests, base64-encoding each entry.
    pub fn from_raw(digests: Vec<Vec<u8>>) -> Self {
        let checksums = digests.iter().map(|d| STANDARD.encode(d)).collect();
        Self { checksums }
    }

    /// Build from the base64 strings a listed object reports.
    ///
    /// Cardinality and decodability are validated here so reconciliation
    /// can treat a malformed set as a mismatch rather than a panic.
    pub fn from_base64(checksums: Vec<String>) -> Result<Self, ChecksumError> {
        if checksums.len() != CHECKSUM_COUNT {
            return Err(ChecksumError::InvalidSet(format!(
                "expected {} checksums, got {}",
                CHECKSUM_COUNT,
                checksums.len()
            )));
        }
        for (index, checksum) in checksums.iter().enumerate() {
            STANDARD.decode(checksum).map_err(|e| {
                ChecksumError::InvalidSet(format!("checksum {} is not valid base64: {}", index, e))
            })?;
        }
        Ok(Self { checksums })
    }

    /// The base64 checksum strings, in protocol order.
    pub fn as_strings(&self) -> &[String] {
        &self.checksums
    }

    /// Decode the set back into raw digests.
    pub fn raw_digests(&self) -> Result<Vec<Vec<u8>>, ChecksumError> {
        self.checksums
            .iter()
            .enumerate()
            .map(|(index, checksum)| {
                STANDARD.decode(checksum).map_err(|e| {
                    ChecksumError::InvalidSet(format!(
                        "checksum {} is not valid base64: {}",
                        index, e
                    ))
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.checksums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checksums.is_empty()
    }
}

/// Compute the redundancy checksum set for a payload.
///
/// Fails if the payload is empty or exceeds [`MAX_ENCODE_SIZE`].
pub fn compute_checksums(payload: &[u8]) -> Result<ChecksumSet, ChecksumError> {
    if payload.is_empty() {
        return Err(ChecksumError::Encoding("payload is empty".to_string()));
    }
    if payload.len() as u64 > MAX_ENCODE_SIZE {
        return Err(ChecksumError::Encoding(format!(
            "payload of {} bytes exceeds the {}-byte encoder ceiling",
            payload.len(),
            MAX_ENCODE_SIZE
        )));
    }

    let encoder = ReedSolomon::new(DATA_SHARDS, PARITY_SHARDS)
        .map_err(|e| ChecksumError::Encoding(format!("encoder setup failed: {}", e)))?;

    // Per-segment digests for the primary checksum, and per shard index
    // the concatenation of that shard's digest across all segments.
    let mut segment_digests: Vec<u8> = Vec::new();
    let mut piece_digests: Vec<Vec<u8>> = vec![Vec::new(); DATA_SHARDS + PARITY_SHARDS];

    for segment in payload.chunks(SEGMENT_SIZE) {
        segment_digests.extend_from_slice(&Sha256::digest(segment));

        // Shards must be equal length; the tail shard is zero padded.
        let shard_len = segment.len().div_ceil(DATA_SHARDS);
        let mut shards: Vec<Vec<u8>> = vec![vec![0u8; shard_len]; DATA_SHARDS + PARITY_SHARDS];
        for (index, chunk) in segment.chunks(shard_len).enumerate() {
            shards[index][..chunk.len()].copy_from_slice(chunk);
        }

        encoder
            .encode(&mut shards)
            .map_err(|e| ChecksumError::Encoding(format!("erasure coding failed: {}", e)))?;

        for (index, shard) in shards.iter().enumerate() {
            piece_digests[index].extend_from_slice(&Sha256::digest(shard));
        }
    }

    let mut digests = Vec::with_capacity(CHECKSUM_COUNT);
    digests.push(Sha256::digest(&segment_digests).to_vec());
    for piece in &piece_digests {
        digests.push(Sha256::digest(piece).to_vec());
    }

    Ok(ChecksumSet::from_raw(digests))
}
