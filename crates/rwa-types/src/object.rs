//! The off-chain object payload

use crate::{DocCategory, DocType, Properties};
use serde::{Deserialize, Serialize};

/// One off-chain document, exactly as it is serialized and uploaded.
///
/// The checksum set and content hash are computed over the serialized
/// bytes of this struct, so the field order here is the wire key order
/// and must not change. An object is never mutated after its checksums
/// are computed; a correction is a new object with a new descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RwaObject {
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub slot: Option<u64>,
    pub category: DocCategory,
    pub properties: Properties,
    pub text: String,
}

impl RwaObject {
    /// Slot value as stored on chain: CONTRACT-type documents and
    /// documents with no slot map to 0.
    pub fn slot_value(&self) -> u64 {
        match self.doc_type {
            DocType::Contract => 0,
            DocType::Slot => self.slot.unwrap_or(0),
        }
    }

    /// Serialize to the exact byte sequence the checksums are computed
    /// over. Key order is struct declaration order and is stable.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Declared MIME type, present only for media categories.
    pub fn declared_mime_type(&self) -> Option<&str> {
        self.properties.declared_mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::NoticeProperties;

    fn notice_object() -> RwaObject {
        RwaObject {
            title: "Quarterly update".to_string(),
            doc_type: DocType::Slot,
            slot: Some(4),
            category: DocCategory::Notice,
            properties: Properties::Notice(NoticeProperties {
                forename: "Ada".to_string(),
                lastname: "Lovelace".to_string(),
                position: "Director".to_string(),
                email: "ada@example.com".to_string(),
            }),
            text: "All holders please note...".to_string(),
        }
    }

    #[test]
    fn test_canonical_bytes_are_stable() {
        let object = notice_object();
        let first = object.to_canonical_bytes().unwrap();
        let second = object.to_canonical_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonical_key_order() {
        let bytes = notice_object().to_canonical_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let title_pos = text.find("\"title\"").unwrap();
        let type_pos = text.find("\"type\"").unwrap();
        let category_pos = text.find("\"category\"").unwrap();
        let text_pos = text.find("\"text\"").unwrap();
        assert!(title_pos < type_pos);
        assert!(type_pos < category_pos);
        assert!(category_pos < text_pos);
    }

    #[test]
    fn test_slot_value_sentinels() {
        let mut object = notice_object();
        assert_eq!(object.slot_value(), 4);

        object.doc_type = DocType::Contract;
        assert_eq!(object.slot_value(), 0);

        object.doc_type = DocType::Slot;
        object.slot = None;
        assert_eq!(object.slot_value(), 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let object = notice_object();
        let json = serde_json::to_string(&object).unwrap();
        let back: RwaObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, object.title);
        assert_eq!(back.category, DocCategory::Notice);
        assert_eq!(back.slot, Some(4));
    }
}
