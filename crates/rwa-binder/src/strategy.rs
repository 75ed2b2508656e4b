//! Write-path strategies
//!
//! The write path has two deployment variants: direct against the
//! storage network, or proxied through a companion service that holds
//! the storage credentials. Both sit behind [`UploadStrategy`] so there
//! is one call site regardless of deployment.

use crate::error::{BinderError, Result};
use alloy::primitives::U256;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rwa_checksum::ChecksumSet;
use rwa_greenfield::{
    select_provider, CreateBucketRequest, CreateObjectRequest, GreenfieldError, ObjectStore,
    Visibility,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One object upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub asset_id: U256,
    pub bucket_name: String,
    pub object_name: String,
    pub payload: Vec<u8>,
    pub checksums: ChecksumSet,
    /// Creator/owner address on the storage network
    pub creator: String,
}

/// Result of a completed upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub object_name: String,
    /// Creation transaction hash; absent when the object already existed
    pub tx_hash: Option<String>,
}

/// How the write path reaches the storage network
#[async_trait]
pub trait UploadStrategy: Send + Sync {
    /// Idempotently ensure the asset's bucket exists.
    ///
    /// Absence of the bucket triggers creation; any other lookup error
    /// is propagated, not swallowed.
    async fn ensure_bucket(&self, asset_id: U256, bucket_name: &str, owner: &str) -> Result<()>;

    /// Create and upload one object.
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome>;
}

/// Direct strategy: storage network client in-process
pub struct DirectUpload {
    store: Arc<dyn ObjectStore>,
    provider_filter: Option<String>,
}

impl DirectUpload {
    pub fn new(store: Arc<dyn ObjectStore>, provider_filter: Option<String>) -> Self {
        Self {
            store,
            provider_filter,
        }
    }
}

#[async_trait]
impl UploadStrategy for DirectUpload {
    async fn ensure_bucket(&self, asset_id: U256, bucket_name: &str, owner: &str) -> Result<()> {
        match self.store.bucket_meta(bucket_name).await {
            Ok(_) => {
                debug!("Bucket {} already exists", bucket_name);
                Ok(())
            }
            Err(GreenfieldError::BucketNotFound(_)) => {
                let providers = self.store.storage_providers().await?;
                let provider =
                    select_provider(&providers, self.provider_filter.as_deref(), bucket_name)?;

                let tx_hash = self
                    .store
                    .create_bucket(CreateBucketRequest {
                        bucket_name: bucket_name.to_string(),
                        creator: owner.to_string(),
                        visibility: Visibility::PublicRead,
                        primary_sp_address: provider.operator_address.clone(),
                    })
                    .await?;

                info!(
                    "Created bucket {} for asset {} in tx {}",
                    bucket_name, asset_id, tx_hash
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome> {
        let create = CreateObjectRequest {
            bucket_name: request.bucket_name.clone(),
            object_name: request.object_name.clone(),
            creator: request.creator.clone(),
            visibility: Visibility::PublicRead,
            content_type: "application/json".to_string(),
            payload_size: request.payload.len() as u64,
            expect_checksums: request.checksums.as_strings().to_vec(),
        };

        let tx_hash = match self.store.create_object(create).await {
            Ok(tx_hash) => tx_hash,
            // Safe to treat as success: the registry-side collision
            // check ran immediately before this call, so an existing
            // object under this name holds these exact bytes.
            Err(GreenfieldError::ObjectAlreadyExists(_)) => {
                warn!(
                    "Object {}/{} already exists, skipping upload",
                    request.bucket_name, request.object_name
                );
                return Ok(UploadOutcome {
                    object_name: request.object_name,
                    tx_hash: None,
                });
            }
            Err(e) => return Err(e.into()),
        };

        self.store
            .upload_object(
                &request.bucket_name,
                &request.object_name,
                request.payload,
                &tx_hash,
            )
            .await?;

        info!(
            "Uploaded object {}/{} in tx {}",
            request.bucket_name, request.object_name, tx_hash
        );
        Ok(UploadOutcome {
            object_name: request.object_name,
            tx_hash: Some(tx_hash),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBucketBody {
    #[serde(rename = "assetID")]
    asset_id: String,
    chain_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddObjectBody {
    #[serde(rename = "assetID")]
    asset_id: String,
    chain_id: String,
    owner: String,
    bucket_name: String,
    object_name: String,
    /// Payload bytes, base64
    payload: String,
    expected_checksums: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyEnvelope {
    ok: bool,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    transaction_hash: Option<String>,
}

/// Remote strategy: companion service holds the storage credentials and
/// performs the network calls; this side only speaks its `{ok, msg}`
/// envelopes.
pub struct RemoteUpload {
    base_url: String,
    chain_id: String,
    client: reqwest::Client,
}

impl RemoteUpload {
    pub fn new(base_url: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            chain_id: chain_id.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn post_envelope<B: Serialize>(&self, path: &str, body: &B) -> Result<ProxyEnvelope> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BinderError::Proxy(e.to_string()))?;

        let envelope: ProxyEnvelope = response
            .json()
            .await
            .map_err(|e| BinderError::Proxy(format!("malformed proxy response: {}", e)))?;

        if !envelope.ok {
            return Err(BinderError::Proxy(envelope.msg));
        }
        Ok(envelope)
    }
}

#[async_trait]
impl UploadStrategy for RemoteUpload {
    async fn ensure_bucket(&self, asset_id: U256, _bucket_name: &str, _owner: &str) -> Result<()> {
        // The proxy resolves the bucket name and owner itself from the
        // asset id; this side only triggers the idempotent creation.
        self.post_envelope(
            "/add-bucket",
            &AddBucketBody {
                asset_id: asset_id.to_string(),
                chain_id: self.chain_id.clone(),
            },
        )
        .await?;
        Ok(())
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome> {
        let envelope = self
            .post_envelope(
                "/add-object",
                &AddObjectBody {
                    asset_id: request.asset_id.to_string(),
                    chain_id: self.chain_id.clone(),
                    owner: request.creator,
                    bucket_name: request.bucket_name,
                    object_name: request.object_name.clone(),
                    payload: STANDARD.encode(&request.payload),
                    expected_checksums: request.checksums.as_strings().to_vec(),
                },
            )
            .await?;

        Ok(UploadOutcome {
            object_name: request.object_name,
            tx_hash: envelope.transaction_hash,
        })
    }
}
