//! Object-storage network client
//!
//! Narrow surface over the decentralized storage network: bucket
//! metadata, bucket creation, object create/upload/fetch/head/list/
//! delete, and storage-provider selection. Mutating operations go
//! through a transaction-signing gateway daemon; reads go to storage
//! provider endpoints. The network's replication and payment protocol
//! are not this crate's concern.

pub mod client;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use client::{select_provider, GreenfieldClient};
pub use config::GreenfieldConfig;
pub use error::{GreenfieldError, Result};
pub use store::ObjectStore;
pub use types::{
    BucketInfo, CreateBucketRequest, CreateObjectRequest, ObjectInfo, StorageProvider, Visibility,
    STATUS_OBJECT_EXISTS, STATUS_OK,
};
