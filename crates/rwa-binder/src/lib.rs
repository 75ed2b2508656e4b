//! Storage binding between the on-chain registry and the object store
//!
//! The write path derives names from registry counters, gates payloads
//! through the category policy, uploads erasure-checksummed bytes, and
//! binds the resulting descriptor on chain - in that order, so a failed
//! bind leaves an inert object rather than a registry entry pointing at
//! missing bytes. The read path lists a bucket and yields only objects
//! whose off-chain checksums match their on-chain descriptor.

pub mod error;
pub mod lifecycle;
pub mod reconcile;
pub mod strategy;

pub use error::{BinderError, Result};
pub use lifecycle::{AddObjectOutcome, StorageBinding};
pub use reconcile::VerifiedObjectInfo;
pub use strategy::{DirectUpload, RemoteUpload, UploadOutcome, UploadRequest, UploadStrategy};
