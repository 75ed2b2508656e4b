//! Gateway-backed implementation of the object store
//!
//! Mutating calls go to a local transaction-signing gateway daemon that
//! broadcasts on the storage network's chain; reads and listings go
//! through the same gateway to a selected storage provider. Responses
//! carry a `{code, message, ...}` envelope; classification is by HTTP
//! status and envelope code, with the network SDK's known quirk strings
//! ("No such bucket", "No such object", "Object already exists") as the
//! only permitted substring checks.

use crate::config::GreenfieldConfig;
use crate::error::{GreenfieldError, Result};
use crate::store::ObjectStore;
use crate::types::{
    BucketInfo, CreateBucketRequest, CreateObjectRequest, ObjectInfo, StorageProvider,
    STATUS_OBJECT_EXISTS, STATUS_OK,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    tx_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BucketMetaResponse {
    code: i64,
    #[serde(default)]
    message: String,
    bucket_info: Option<BucketInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetaResponse {
    code: i64,
    #[serde(default)]
    message: String,
    object_info: Option<ObjectInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListObjectsResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    objects: Vec<ObjectInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpListResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    providers: Vec<StorageProvider>,
}

/// Pick a storage provider for a bucket.
///
/// Filters by the configured endpoint substring, then makes a stable
/// choice keyed on the bucket name so repeated operations on one bucket
/// land on the same provider.
pub fn select_provider<'a>(
    providers: &'a [StorageProvider],
    filter: Option<&str>,
    key: &str,
) -> Result<&'a StorageProvider> {
    let candidates: Vec<&StorageProvider> = providers
        .iter()
        .filter(|sp| filter.is_none_or(|f| sp.endpoint.contains(f)))
        .collect();

    if candidates.is_empty() {
        return Err(GreenfieldError::NoProvider(match filter {
            Some(f) => format!("no provider endpoint matches filter {:?}", f),
            None => "provider list is empty".to_string(),
        }));
    }

    let index = key.bytes().fold(0usize, |acc, b| acc.wrapping_add(b as usize)) % candidates.len();
    Ok(candidates[index])
}

/// Client for the storage network gateway
pub struct GreenfieldClient {
    config: GreenfieldConfig,
    client: reqwest::Client,
}

impl GreenfieldClient {
    pub fn new(config: GreenfieldConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GreenfieldError::Configuration(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.gateway_url.trim_end_matches('/'), path)
    }

    /// Select a provider for a bucket using the configured filter.
    pub async fn provider_for(&self, bucket_name: &str) -> Result<StorageProvider> {
        let providers = self.storage_providers().await?;
        select_provider(&providers, self.config.provider_filter.as_deref(), bucket_name)
            .map(|provider| provider.clone())
    }
}

#[async_trait]
impl ObjectStore for GreenfieldClient {
    async fn bucket_meta(&self, bucket_name: &str) -> Result<BucketInfo> {
        debug!("Fetching bucket meta for {}", bucket_name);

        let response = self
            .client
            .get(self.url(&format!("/v1/buckets/{}", bucket_name)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::BucketNotFound(bucket_name.to_string()));
        }
        if !response.status().is_success() {
            return Err(GreenfieldError::BucketLookup(
                bucket_name.to_string(),
                format!("gateway returned {}", response.status()),
            ));
        }

        let meta: BucketMetaResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if meta.code != STATUS_OK {
            if meta.message.contains("No such bucket") {
                return Err(GreenfieldError::BucketNotFound(bucket_name.to_string()));
            }
            return Err(GreenfieldError::BucketLookup(
                bucket_name.to_string(),
                meta.message,
            ));
        }

        meta.bucket_info.ok_or_else(|| {
            GreenfieldError::InvalidResponse("bucket meta response without bucketInfo".to_string())
        })
    }

    async fn create_bucket(&self, request: CreateBucketRequest) -> Result<String> {
        debug!(
            "Creating bucket {} with primary provider {}",
            request.bucket_name, request.primary_sp_address
        );

        let response = self
            .client
            .post(self.url("/v1/buckets"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if !status.is_success() || body.code != STATUS_OK {
            return Err(GreenfieldError::Gateway(format!(
                "bucket creation failed for {}: code {} {}",
                request.bucket_name, body.code, body.message
            )));
        }

        body.tx_hash.ok_or_else(|| {
            GreenfieldError::InvalidResponse("bucket creation response without txHash".to_string())
        })
    }

    async fn create_object(&self, request: CreateObjectRequest) -> Result<String> {
        debug!(
            "Creating object {} in bucket {} ({} bytes, {} checksums)",
            request.object_name,
            request.bucket_name,
            request.payload_size,
            request.expect_checksums.len()
        );

        let response = self
            .client
            .post(self.url(&format!("/v1/buckets/{}/objects", request.bucket_name)))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if !status.is_success() || body.code != STATUS_OK {
            if body.message.contains("Object already exists") {
                return Err(GreenfieldError::ObjectAlreadyExists(
                    request.object_name.clone(),
                ));
            }
            return Err(GreenfieldError::Gateway(format!(
                "object creation failed for {}: code {} {}",
                request.object_name, body.code, body.message
            )));
        }

        body.tx_hash.ok_or_else(|| {
            GreenfieldError::InvalidResponse("object creation response without txHash".to_string())
        })
    }

    async fn upload_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        payload: Vec<u8>,
        tx_hash: &str,
    ) -> Result<()> {
        debug!(
            "Uploading {} bytes to {}/{} for tx {}",
            payload.len(),
            bucket_name,
            object_name,
            tx_hash
        );

        let response = self
            .client
            .put(self.url(&format!(
                "/v1/buckets/{}/objects/{}/payload",
                bucket_name, object_name
            )))
            .query(&[("txHash", tx_hash)])
            .body(payload)
            .send()
            .await?;

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        match body.code {
            STATUS_OK => Ok(()),
            // The object was sealed by an earlier attempt. Safe: the
            // registry-side collision check ran immediately before this
            // call, so the existing bytes are these bytes.
            STATUS_OBJECT_EXISTS => {
                warn!(
                    "Object {}/{} already sealed, treating upload as success",
                    bucket_name, object_name
                );
                Ok(())
            }
            code => Err(GreenfieldError::UploadFailed {
                object_name: object_name.to_string(),
                code,
                message: body.message,
            }),
        }
    }

    async fn get_object(&self, bucket_name: &str, object_name: &str) -> Result<Vec<u8>> {
        debug!("Fetching object {}/{}", bucket_name, object_name);

        let response = self
            .client
            .get(self.url(&format!(
                "/v1/buckets/{}/objects/{}/payload",
                bucket_name, object_name
            )))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::ObjectNotFound(object_name.to_string()));
        }
        if !response.status().is_success() {
            return Err(GreenfieldError::Gateway(format!(
                "object fetch failed for {}/{}: {}",
                bucket_name,
                object_name,
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn head_object(&self, bucket_name: &str, object_name: &str) -> Result<ObjectInfo> {
        debug!("Heading object {}/{}", bucket_name, object_name);

        let response = self
            .client
            .get(self.url(&format!(
                "/v1/buckets/{}/objects/{}",
                bucket_name, object_name
            )))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::ObjectNotFound(object_name.to_string()));
        }

        let body: ObjectMetaResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if body.code != STATUS_OK {
            if body.message.contains("No such object") {
                return Err(GreenfieldError::ObjectNotFound(object_name.to_string()));
            }
            return Err(GreenfieldError::Gateway(format!(
                "head failed for {}/{}: code {} {}",
                bucket_name, object_name, body.code, body.message
            )));
        }

        body.object_info.ok_or_else(|| {
            GreenfieldError::InvalidResponse("head response without objectInfo".to_string())
        })
    }

    async fn list_objects(&self, bucket_name: &str) -> Result<Vec<ObjectInfo>> {
        let provider = self.provider_for(bucket_name).await?;
        debug!(
            "Listing objects in {} via provider {}",
            bucket_name, provider.endpoint
        );

        let response = self
            .client
            .get(self.url(&format!("/v1/buckets/{}/objects", bucket_name)))
            .query(&[("endpoint", provider.endpoint.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::BucketNotFound(bucket_name.to_string()));
        }

        let body: ListObjectsResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if body.code != STATUS_OK {
            return Err(GreenfieldError::Gateway(format!(
                "listing failed for {}: code {} {}",
                bucket_name, body.code, body.message
            )));
        }

        debug!("Listed {} objects in {}", body.objects.len(), bucket_name);
        Ok(body.objects)
    }

    async fn delete_object(&self, bucket_name: &str, object_name: &str) -> Result<String> {
        debug!("Deleting object {}/{}", bucket_name, object_name);

        let response = self
            .client
            .delete(self.url(&format!(
                "/v1/buckets/{}/objects/{}",
                bucket_name, object_name
            )))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::ObjectNotFound(object_name.to_string()));
        }

        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if body.code != STATUS_OK {
            return Err(GreenfieldError::Gateway(format!(
                "object deletion failed for {}/{}: code {} {}",
                bucket_name, object_name, body.code, body.message
            )));
        }

        body.tx_hash.ok_or_else(|| {
            GreenfieldError::InvalidResponse("deletion response without txHash".to_string())
        })
    }

    async fn delete_bucket(&self, bucket_name: &str) -> Result<String> {
        debug!("Deleting bucket {}", bucket_name);

        let response = self
            .client
            .delete(self.url(&format!("/v1/buckets/{}", bucket_name)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GreenfieldError::BucketNotFound(bucket_name.to_string()));
        }

        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if body.code != STATUS_OK {
            return Err(GreenfieldError::Gateway(format!(
                "bucket deletion failed for {}: code {} {}",
                bucket_name, body.code, body.message
            )));
        }

        body.tx_hash.ok_or_else(|| {
            GreenfieldError::InvalidResponse("deletion response without txHash".to_string())
        })
    }

    async fn storage_providers(&self) -> Result<Vec<StorageProvider>> {
        let response = self.client.get(self.url("/v1/sps")).send().await?;

        let body: SpListResponse = response
            .json()
            .await
            .map_err(|e| GreenfieldError::InvalidResponse(e.to_string()))?;

        if body.code != STATUS_OK {
            return Err(GreenfieldError::Gateway(format!(
                "provider listing failed: code {} {}",
                body.code, body.message
            )));
        }

        Ok(body.providers)
    }
}
