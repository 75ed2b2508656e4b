//! Core data model for RWA storage objects
//!
//! This crate defines the document categories and types recognized by the
//! on-chain registry, the off-chain `RwaObject` payload that gets uploaded
//! to the storage network, and the local policy gate that every payload
//! must pass before any network call is made.

pub mod category;
pub mod object;
pub mod policy;
pub mod properties;

pub use category::{DocCategory, DocType};
pub use object::RwaObject;
pub use policy::{validate, PolicyError};
pub use properties::Properties;
