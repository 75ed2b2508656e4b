//! The registry trait
//!
//! One interface over the on-chain registry so the lifecycle and
//! reconciliation layers can run against the EVM implementation in
//! production and against fixtures in tests.

use crate::descriptor::StorageDescriptor;
use crate::error::Result;
use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use rwa_types::{DocCategory, DocType};

/// A descriptor write request.
#[derive(Debug, Clone)]
pub struct BindRequest {
    pub asset_id: U256,
    pub category: DocCategory,
    pub doc_type: DocType,
    pub slot: u64,
    pub title: String,
    pub content_hash: B256,
    /// Chains the descriptor is propagated to (decimal chain ids)
    pub destination_chains: Vec<String>,
    /// Fee token override; the chain's configured default when `None`
    pub fee_token: Option<Address>,
}

/// Read/write surface of the on-chain registry.
///
/// Every method is a live remote read or write - no local caching, so
/// collision checks never act on stale state. Callers serialize
/// operations per asset id; the registry's own counters and uniqueness
/// checks are the real serialization points.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Per-asset storage contract address.
    async fn storage_contract(&self, asset_id: U256) -> Result<Address>;

    /// Token admin of the asset, used as the bucket owner.
    async fn token_admin(&self, asset_id: U256) -> Result<Address>;

    /// Canonical bucket name for the asset, sanitized for the storage
    /// network.
    async fn bucket_name(&self, asset_id: U256) -> Result<String>;

    /// Next object name for a (type, slot) pair, derived from the
    /// registry-owned counter and sanitized. The counter is incremented
    /// by the registry contract, never by this layer, so a name is only
    /// ever handed out once.
    async fn next_object_name(
        &self,
        asset_id: U256,
        doc_type: DocType,
        slot: u64,
    ) -> Result<String>;

    /// Descriptor registered under a content hash, if any.
    async fn descriptor_by_hash(
        &self,
        asset_id: U256,
        hash: B256,
    ) -> Result<Option<StorageDescriptor>>;

    /// Whether a content hash is already registered.
    async fn hash_exists(&self, asset_id: U256, hash: B256) -> Result<bool>;

    /// Count of descriptors for a (category, type) pair.
    async fn descriptor_count(
        &self,
        asset_id: U256,
        category: DocCategory,
        doc_type: DocType,
    ) -> Result<u64>;

    /// Object name already registered for a hash - the reuse path for
    /// byte-identical content.
    async fn existing_object_name(&self, asset_id: U256, hash: B256) -> Result<Option<String>> {
        Ok(self
            .descriptor_by_hash(asset_id, hash)
            .await?
            .map(|d| d.object_name))
    }

    /// Write a new descriptor: quote and approve the cross-chain fee,
    /// fail fast on a duplicate hash, enforce the first-descriptor
    /// ordering invariant, submit, and await inclusion. Returns the
    /// transaction hash.
    async fn bind_descriptor(&self, request: BindRequest) -> Result<String>;
}
