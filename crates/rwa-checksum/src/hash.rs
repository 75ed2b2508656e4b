//! Canonical content hash
//!
//! The registry stores `keccak256(abi.encode(checksums as strings))` as
//! the 32-byte fingerprint binding a descriptor to its off-chain bytes.
//! The encoding treats the set as an ordered sequence of `string` values
//! (parameter encoding, matching the registry tooling), so the hash is
//! order-sensitive.

use crate::redundancy::ChecksumSet;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{keccak256, B256};

/// Derive the canonical content hash from a checksum set.
///
/// Pure function: no I/O, no randomness. Used on the write path to
/// compute the hash registered on chain, and during reconciliation to
/// recompute it from a listed object's reported checksums.
pub fn content_hash(set: &ChecksumSet) -> B256 {
    let values: Vec<DynSolValue> = set
        .as_strings()
        .iter()
        .map(|s| DynSolValue::String(s.clone()))
        .collect();
    let encoded = DynSolValue::Tuple(values).abi_encode_params();
    keccak256(encoded)
}
