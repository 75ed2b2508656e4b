//! On-chain registry client
//!
//! The registry contract is the source of truth for every stored object's
//! category, type, slot, title and content hash. This crate provides the
//! typed contract surface, per-chain configuration, deterministic name
//! resolution from registry counters, descriptor reads, and the binder
//! that writes new descriptors (paying the cross-chain fee and enforcing
//! the first-descriptor ordering invariant).

pub mod abi;
pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod interface;
pub mod naming;

pub use client::EvmRegistry;
pub use config::{ChainConfig, RegistryConfig};
pub use descriptor::StorageDescriptor;
pub use error::{RegistryError, Result};
pub use interface::{BindRequest, Registry};
pub use naming::sanitize_object_name;
