//! On-chain storage descriptors

use crate::error::{RegistryError, Result};
use alloy::primitives::B256;
use rwa_types::{DocCategory, DocType};
use serde::{Deserialize, Serialize};

/// One registered document descriptor, as stored by the registry.
///
/// Created once per upload and immutable thereafter; a changed document
/// is a new descriptor with a new hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDescriptor {
    pub category: DocCategory,
    pub doc_type: DocType,
    pub title: String,
    pub slot: u64,
    pub object_name: String,
    pub content_hash: B256,
    pub timestamp: u64,
}

impl StorageDescriptor {
    /// Build from the raw tuple the registry contract returns.
    pub fn from_tuple(
        category: u8,
        doc_type: u8,
        title: String,
        slot: u64,
        object_name: String,
        content_hash: B256,
        timestamp: u64,
    ) -> Result<Self> {
        let category = DocCategory::from_ordinal(category)
            .ok_or_else(|| RegistryError::UnmappedValue(format!("category ordinal {}", category)))?;
        let doc_type = DocType::from_ordinal(doc_type)
            .ok_or_else(|| RegistryError::UnmappedValue(format!("type ordinal {}", doc_type)))?;

        Ok(Self {
            category,
            doc_type,
            title,
            slot,
            object_name,
            content_hash,
            timestamp,
        })
    }

    /// Slot as reported to callers: CONTRACT-type descriptors have no
    /// meaningful slot and report the -1 sentinel.
    pub fn reported_slot(&self) -> i64 {
        match self.doc_type {
            DocType::Contract => -1,
            DocType::Slot => self.slot as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tuple_maps_ordinals() {
        let descriptor = StorageDescriptor::from_tuple(
            9,
            1,
            "Quarterly update".to_string(),
            4,
            "notice-1-4-0".to_string(),
            B256::ZERO,
            1_700_000_000,
        )
        .unwrap();
        assert_eq!(descriptor.category, DocCategory::Notice);
        assert_eq!(descriptor.doc_type, DocType::Slot);
        assert_eq!(descriptor.reported_slot(), 4);
    }

    #[test]
    fn test_from_tuple_rejects_unknown_ordinals() {
        let err = StorageDescriptor::from_tuple(
            16,
            0,
            String::new(),
            0,
            String::new(),
            B256::ZERO,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::UnmappedValue(_)));
    }

    #[test]
    fn test_contract_descriptor_reports_sentinel_slot() {
        let descriptor = StorageDescriptor::from_tuple(
            0,
            0,
            "Issuer".to_string(),
            0,
            "contract-0-0".to_string(),
            B256::ZERO,
            0,
        )
        .unwrap();
        assert_eq!(descriptor.reported_slot(), -1);
    }
}
