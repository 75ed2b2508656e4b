//! Write-path lifecycle
//!
//! One write attempt walks: policy gate, checksum computation, bucket
//! check/creation, registry collision check, object create + upload,
//! descriptor bind. Upload strictly precedes the bind so a failed bind
//! leaves an inert object, never a registry entry without bytes.
//!
//! Operations on the same asset id must be serialized by the caller;
//! the registry's counters and uniqueness checks are the serialization
//! points, and they live on chain, not here.

use crate::error::{BinderError, Result};
use crate::strategy::{UploadRequest, UploadStrategy};
use alloy::primitives::{Address, B256, U256};
use rwa_checksum::{compute_checksums, content_hash, ChecksumSet};
use rwa_greenfield::{ObjectInfo, ObjectStore};
use rwa_registry::{sanitize_object_name, BindRequest, Registry};
use rwa_types::{validate, RwaObject};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one completed write
#[derive(Debug, Clone)]
pub struct AddObjectOutcome {
    pub bucket_name: String,
    pub object_name: String,
    pub content_hash: B256,
    /// Storage-network creation transaction, absent when the object was
    /// already sealed
    pub upload_tx: Option<String>,
    /// Registry bind transaction, absent on the reuse path
    pub bind_tx: Option<String>,
    /// Whether an already-registered object was reused instead of
    /// allocating a new name
    pub reused: bool,
}

/// The storage binding layer.
///
/// Holds the registry client, the object-store client for reads, and
/// the configured write strategy. All three are read-only after
/// construction; it is safe to share one instance across tasks and to
/// run operations for different asset ids concurrently.
pub struct StorageBinding {
    registry: Arc<dyn Registry>,
    store: Arc<dyn ObjectStore>,
    strategy: Arc<dyn UploadStrategy>,
}

impl StorageBinding {
    pub fn new(
        registry: Arc<dyn Registry>,
        store: Arc<dyn ObjectStore>,
        strategy: Arc<dyn UploadStrategy>,
    ) -> Self {
        Self {
            registry,
            store,
            strategy,
        }
    }

    pub(crate) fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    pub(crate) fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Resolve the asset's bucket name and idempotently ensure the
    /// bucket exists. Returns the bucket name.
    pub async fn ensure_bucket(&self, asset_id: U256) -> Result<String> {
        let bucket_name = self.registry.bucket_name(asset_id).await?;
        let owner = self.registry.token_admin(asset_id).await?;
        self.strategy
            .ensure_bucket(asset_id, &bucket_name, &owner.to_string())
            .await?;
        Ok(bucket_name)
    }

    /// Compute the checksum set and content hash for an object without
    /// touching the network.
    pub fn checksum(&self, object: &RwaObject) -> Result<(ChecksumSet, B256)> {
        let payload = object.to_canonical_bytes()?;
        let checksums = compute_checksums(&payload)?;
        let hash = content_hash(&checksums);
        Ok((checksums, hash))
    }

    /// Upload a new object and bind its descriptor.
    ///
    /// With `reuse_existing`, a payload whose hash is already registered
    /// is re-uploaded under its existing object name instead of
    /// allocating a new counter slot; without it, a registered hash is a
    /// [`RegistryError::DuplicateHash`] failure.
    ///
    /// [`RegistryError::DuplicateHash`]: rwa_registry::RegistryError::DuplicateHash
    pub async fn add_object(
        &self,
        asset_id: U256,
        object: &RwaObject,
        destination_chains: Vec<String>,
        fee_token: Option<Address>,
        reuse_existing: bool,
    ) -> Result<AddObjectOutcome> {
        // Local gates first: policy and checksums never touch the
        // network.
        let payload = object.to_canonical_bytes()?;
        validate(
            object.category,
            payload.len() as u64,
            object.declared_mime_type(),
        )?;

        let checksums = compute_checksums(&payload)?;
        let hash = content_hash(&checksums);
        debug!(
            "Object {:?} for asset {} serializes to {} bytes, hash 0x{:x}",
            object.title,
            asset_id,
            payload.len(),
            hash
        );

        let bucket_name = self.registry.bucket_name(asset_id).await?;
        let owner = self.registry.token_admin(asset_id).await?;
        self.strategy
            .ensure_bucket(asset_id, &bucket_name, &owner.to_string())
            .await?;

        // Collision check against the registry. Reuse keeps byte-identical
        // content at one object instead of storing it twice.
        let existing = self.registry.existing_object_name(asset_id, hash).await?;
        let (object_name, reused) = match existing {
            Some(name) if reuse_existing => {
                info!(
                    "Hash 0x{:x} already registered as {}, reusing",
                    hash, name
                );
                (sanitize_object_name(&name)?, true)
            }
            Some(_) => {
                return Err(BinderError::Registry(
                    rwa_registry::RegistryError::DuplicateHash(format!("0x{:x}", hash)),
                ))
            }
            None => (
                self.registry
                    .next_object_name(asset_id, object.doc_type, object.slot_value())
                    .await?,
                false,
            ),
        };

        let outcome = self
            .strategy
            .upload(UploadRequest {
                asset_id,
                bucket_name: bucket_name.clone(),
                object_name: object_name.clone(),
                payload,
                checksums,
                creator: owner.to_string(),
            })
            .await?;

        // Bind only after the bytes are stored. A failure here leaves an
        // orphaned object that will simply never reconcile.
        let bind_tx = if reused {
            None
        } else {
            Some(
                self.registry
                    .bind_descriptor(BindRequest {
                        asset_id,
                        category: object.category,
                        doc_type: object.doc_type,
                        slot: object.slot_value(),
                        title: object.title.clone(),
                        content_hash: hash,
                        destination_chains,
                        fee_token,
                    })
                    .await?,
            )
        };

        Ok(AddObjectOutcome {
            bucket_name,
            object_name,
            content_hash: hash,
            upload_tx: outcome.tx_hash,
            bind_tx,
            reused,
        })
    }

    /// Fetch and buffer an object's raw bytes.
    pub async fn fetch_object(&self, asset_id: U256, object_name: &str) -> Result<Vec<u8>> {
        let bucket_name = self.registry.bucket_name(asset_id).await?;
        Ok(self.store.get_object(&bucket_name, object_name).await?)
    }

    /// Fetch an object and deserialize it back into its payload model.
    pub async fn fetch_rwa_object(&self, asset_id: U256, object_name: &str) -> Result<RwaObject> {
        let bytes = self.fetch_object(asset_id, object_name).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Raw object listing without registry cross-referencing.
    pub async fn list_raw(&self, asset_id: U256) -> Result<Vec<ObjectInfo>> {
        let bucket_name = self.registry.bucket_name(asset_id).await?;
        Ok(self.store.list_objects(&bucket_name).await?)
    }

    /// Delete one object. Returns the transaction hash.
    pub async fn delete_object(&self, asset_id: U256, object_name: &str) -> Result<String> {
        let bucket_name = self.registry.bucket_name(asset_id).await?;
        Ok(self.store.delete_object(&bucket_name, object_name).await?)
    }

    /// Delete the asset's bucket. Returns the transaction hash.
    pub async fn delete_bucket(&self, asset_id: U256) -> Result<String> {
        let bucket_name = self.registry.bucket_name(asset_id).await?;
        Ok(self.store.delete_bucket(&bucket_name).await?)
    }
}
