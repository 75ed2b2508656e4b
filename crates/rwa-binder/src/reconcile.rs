//! Integrity reconciliation
//!
//! The trust boundary of the whole layer: a holder or auditor calls
//! [`StorageBinding::reconcile`] and receives only objects whose
//! registry binding is cryptographically consistent, regardless of what
//! bytes a buggy or malicious storage provider serves. Verification is
//! per object; one bad object never blocks the rest.

use crate::error::{BinderError, Result};
use crate::lifecycle::StorageBinding;
use alloy::primitives::U256;
use futures::stream::{self, StreamExt};
use rwa_checksum::{content_hash, ChecksumSet};
use rwa_greenfield::{ObjectInfo, Visibility};
use rwa_registry::sanitize_object_name;
use rwa_types::{DocCategory, DocType};
use serde::Serialize;
use tracing::{debug, warn};

/// Listed objects verified concurrently per reconciliation pass
const RECONCILE_CONCURRENCY: usize = 8;

/// One object whose registry binding has been verified
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedObjectInfo {
    pub name: String,
    pub category: DocCategory,
    pub doc_type: DocType,
    /// -1 for contract-level documents
    pub slot: i64,
    pub title: String,
    pub owner: String,
    pub creator: String,
    pub size: u64,
    pub visibility: Visibility,
    pub creation_time: u64,
    pub registry_timestamp: u64,
    pub checksums: Vec<String>,
}

impl StorageBinding {
    /// List the asset's bucket and return only objects whose recomputed
    /// content hash and object name match their on-chain descriptor.
    ///
    /// Mismatches are logged and excluded; they never abort the pass.
    pub async fn reconcile(&self, asset_id: U256) -> Result<Vec<VerifiedObjectInfo>> {
        let bucket_name = self.registry().bucket_name(asset_id).await?;
        let objects = self.store().list_objects(&bucket_name).await?;
        debug!(
            "Reconciling {} candidate objects in {}",
            objects.len(),
            bucket_name
        );

        let verified: Vec<Option<VerifiedObjectInfo>> = stream::iter(objects)
            .map(|info| async move {
                let object_name = info.object_name.clone();
                match self.verify_listed(asset_id, info).await {
                    Ok(verified) => Some(verified),
                    Err(e) => {
                        warn!("Excluding object {}: {}", object_name, e);
                        None
                    }
                }
            })
            .buffer_unordered(RECONCILE_CONCURRENCY)
            .collect()
            .await;

        let verified: Vec<VerifiedObjectInfo> = verified.into_iter().flatten().collect();
        debug!("Reconciled {} objects in {}", verified.len(), bucket_name);
        Ok(verified)
    }

    /// Verify a single object by name, surfacing the precise mismatch
    /// reason on failure.
    pub async fn reconcile_one(
        &self,
        asset_id: U256,
        object_name: &str,
    ) -> Result<VerifiedObjectInfo> {
        let bucket_name = self.registry().bucket_name(asset_id).await?;
        let info = self.store().head_object(&bucket_name, object_name).await?;
        self.verify_listed(asset_id, info).await
    }

    /// Cross-check one listed object against the registry.
    ///
    /// Recomputes the content hash from the checksums the network
    /// reports, fetches the descriptor registered under that hash, and
    /// accepts the object only if the descriptor's object name and
    /// content hash both agree with what was listed.
    async fn verify_listed(&self, asset_id: U256, info: ObjectInfo) -> Result<VerifiedObjectInfo> {
        let checksums = ChecksumSet::from_base64(info.checksums.clone())?;
        let object_hash = content_hash(&checksums);

        let descriptor = self
            .registry()
            .descriptor_by_hash(asset_id, object_hash)
            .await?
            .ok_or_else(|| {
                BinderError::Registry(rwa_registry::RegistryError::DescriptorNotFound(format!(
                    "0x{:x}",
                    object_hash
                )))
            })?;

        let registered_name = sanitize_object_name(&descriptor.object_name)?;
        if registered_name != info.object_name {
            return Err(BinderError::NameMismatch {
                object_name: info.object_name,
                registered_name,
            });
        }

        if descriptor.content_hash != object_hash {
            return Err(BinderError::HashMismatch {
                object_name: info.object_name,
                registry_hash: format!("0x{:x}", descriptor.content_hash),
                object_hash: format!("0x{:x}", object_hash),
            });
        }

        Ok(VerifiedObjectInfo {
            name: info.object_name,
            category: descriptor.category,
            doc_type: descriptor.doc_type,
            slot: descriptor.reported_slot(),
            title: descriptor.title,
            owner: info.owner,
            creator: info.creator,
            size: info.payload_size,
            visibility: info.visibility,
            creation_time: info.create_at,
            registry_timestamp: descriptor.timestamp,
            checksums: info.checksums,
        })
    }
}
