//! Wire types for the storage network surface

use serde::{Deserialize, Serialize};

/// Gateway status code for success
pub const STATUS_OK: i64 = 0;

/// Gateway status code for "object already exists". Benign on upload:
/// the registry-side collision check already ran, so the existing bytes
/// are the same bytes.
pub const STATUS_OBJECT_EXISTS: i64 = 110_004;

/// Object and bucket visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[serde(rename = "VISIBILITY_TYPE_PUBLIC_READ")]
    PublicRead,
    #[serde(rename = "VISIBILITY_TYPE_PRIVATE")]
    Private,
}

/// One storage provider on the network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProvider {
    pub id: u32,
    pub operator_address: String,
    pub endpoint: String,
    #[serde(default)]
    pub moniker: String,
}

/// Bucket metadata as reported by the network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    pub bucket_name: String,
    pub owner: String,
    pub visibility: Visibility,
    pub create_at: u64,
}

/// Raw object metadata as reported by the network.
///
/// No registry cross-referencing: `checksums` is whatever the network
/// reports, verified separately during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    pub object_name: String,
    pub owner: String,
    pub creator: String,
    pub payload_size: u64,
    pub visibility: Visibility,
    pub create_at: u64,
    pub checksums: Vec<String>,
}

/// Request to create a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketRequest {
    pub bucket_name: String,
    /// Bucket owner (the asset's token admin)
    pub creator: String,
    pub visibility: Visibility,
    /// Selected primary storage provider
    pub primary_sp_address: String,
}

/// Request to create an object ahead of its upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObjectRequest {
    pub bucket_name: String,
    pub object_name: String,
    pub creator: String,
    pub visibility: Visibility,
    pub content_type: String,
    /// Declared payload size in bytes
    pub payload_size: u64,
    /// Expected redundancy checksums, base64, protocol order
    pub expect_checksums: Vec<String>,
}
