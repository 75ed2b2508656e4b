//! Redundancy checksums and the canonical content hash
//!
//! The storage network stores every object with erasure-coded redundancy
//! and records a fixed-cardinality set of integrity checksums for it. The
//! registry stores a single 32-byte content hash derived from that set.
//! This crate computes both, and recomputes them during reconciliation
//! from the checksum set a listed object reports.

pub mod error;
pub mod hash;
pub mod redundancy;

pub use error::ChecksumError;
pub use hash::content_hash;
pub use redundancy::{
    compute_checksums, ChecksumSet, CHECKSUM_COUNT, DATA_SHARDS, PARITY_SHARDS, SEGMENT_SIZE,
};
