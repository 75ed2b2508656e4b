//! The object-store trait
//!
//! One interface over the storage network so the lifecycle layer can run
//! against the gateway client in production and against fixtures in
//! tests.

use crate::error::Result;
use crate::types::{
    BucketInfo, CreateBucketRequest, CreateObjectRequest, ObjectInfo, StorageProvider,
};
use async_trait::async_trait;

/// Narrow surface of the storage network.
///
/// Mutating operations require a signed transaction on the network side;
/// none are retried here - callers own the retry policy and must
/// re-check existence after a timeout before retrying a write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket metadata. Absence is [`GreenfieldError::BucketNotFound`],
    /// never a generic failure.
    ///
    /// [`GreenfieldError::BucketNotFound`]: crate::GreenfieldError::BucketNotFound
    async fn bucket_meta(&self, bucket_name: &str) -> Result<BucketInfo>;

    /// Create a bucket. Returns the creation transaction hash.
    async fn create_bucket(&self, request: CreateBucketRequest) -> Result<String>;

    /// Create an object with its declared size and checksum set.
    /// Returns the creation transaction hash the upload must reference.
    async fn create_object(&self, request: CreateObjectRequest) -> Result<String>;

    /// Upload the payload bytes for a previously created object.
    async fn upload_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        payload: Vec<u8>,
        tx_hash: &str,
    ) -> Result<()>;

    /// Fetch and buffer an object's bytes.
    async fn get_object(&self, bucket_name: &str, object_name: &str) -> Result<Vec<u8>>;

    /// Metadata for a single object.
    async fn head_object(&self, bucket_name: &str, object_name: &str) -> Result<ObjectInfo>;

    /// Raw metadata of every object in a bucket. No registry
    /// cross-referencing - reconciliation is a separate pass.
    async fn list_objects(&self, bucket_name: &str) -> Result<Vec<ObjectInfo>>;

    /// Delete an object. Returns the transaction hash.
    async fn delete_object(&self, bucket_name: &str, object_name: &str) -> Result<String>;

    /// Delete a bucket. Returns the transaction hash.
    async fn delete_bucket(&self, bucket_name: &str) -> Result<String>;

    /// Storage providers currently on the network.
    async fn storage_providers(&self) -> Result<Vec<StorageProvider>>;
}
