//! Local policy gate for object payloads
//!
//! Runs before any network call: size ceilings per category, and a MIME
//! prefix requirement for binary media categories. Pure and synchronous.

use crate::DocCategory;
use thiserror::Error;

/// Policy gate failures
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Category has no size-limit entry (ICON currently has none)
    #[error("no size limit is defined for category {0}")]
    UnknownCategory(DocCategory),

    /// Payload exceeds the category's byte ceiling
    #[error("size {size} exceeds the {limit}-byte limit for category {category}")]
    SizeLimitExceeded {
        category: DocCategory,
        size: u64,
        limit: u64,
    },

    /// Declared MIME type does not match the media category
    #[error("MIME type {mime:?} is not compatible with category {category}")]
    MimeTypeMismatch {
        category: DocCategory,
        mime: String,
    },
}

/// Byte-size ceiling for a category, if one is defined.
pub fn size_limit(category: DocCategory) -> Option<u64> {
    match category {
        DocCategory::Issuer => Some(100_000),
        DocCategory::Notice
        | DocCategory::Provenance
        | DocCategory::Valuation
        | DocCategory::Legal
        | DocCategory::Financial
        | DocCategory::License
        | DocCategory::DueDiligence => Some(500_000),
        DocCategory::Rating
        | DocCategory::Dividend
        | DocCategory::Redemption
        | DocCategory::WhoCanInvest => Some(200_000),
        DocCategory::Prospectus => Some(1_000_000),
        DocCategory::Image => Some(2_000_000),
        DocCategory::Video => Some(50_000_000_000),
        DocCategory::Icon => None,
    }
}

/// Validate a payload against its declared category.
///
/// `size` is the serialized payload size in bytes; `declared_mime_type`
/// is required for IMAGE and VIDEO categories and ignored otherwise.
pub fn validate(
    category: DocCategory,
    size: u64,
    declared_mime_type: Option<&str>,
) -> Result<(), PolicyError> {
    let limit = size_limit(category).ok_or(PolicyError::UnknownCategory(category))?;

    if size > limit {
        return Err(PolicyError::SizeLimitExceeded {
            category,
            size,
            limit,
        });
    }

    let required_prefix = match category {
        DocCategory::Image => Some("image/"),
        DocCategory::Video => Some("video/"),
        _ => None,
    };

    if let Some(prefix) = required_prefix {
        let mime = declared_mime_type.unwrap_or("");
        if !mime.starts_with(prefix) {
            return Err(PolicyError::MimeTypeMismatch {
                category,
                mime: mime.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_boundary() {
        assert!(validate(DocCategory::Image, 2_000_000, Some("image/png")).is_ok());

        let err = validate(DocCategory::Image, 2_000_001, Some("image/png")).unwrap_err();
        assert!(matches!(err, PolicyError::SizeLimitExceeded { .. }));
    }

    #[test]
    fn test_image_mime_mismatch() {
        let err = validate(DocCategory::Image, 1_000, Some("application/pdf")).unwrap_err();
        assert!(matches!(err, PolicyError::MimeTypeMismatch { .. }));
    }

    #[test]
    fn test_video_requires_video_mime() {
        assert!(validate(DocCategory::Video, 1_000, Some("video/mp4")).is_ok());
        let err = validate(DocCategory::Video, 1_000, Some("image/png")).unwrap_err();
        assert!(matches!(err, PolicyError::MimeTypeMismatch { .. }));
    }

    #[test]
    fn test_missing_mime_for_media() {
        let err = validate(DocCategory::Image, 1_000, None).unwrap_err();
        assert!(matches!(err, PolicyError::MimeTypeMismatch { .. }));
    }

    #[test]
    fn test_issuer_limit() {
        assert!(validate(DocCategory::Issuer, 100_000, None).is_ok());
        assert!(validate(DocCategory::Issuer, 100_001, None).is_err());
    }

    #[test]
    fn test_icon_has_no_entry() {
        let err = validate(DocCategory::Icon, 1, None).unwrap_err();
        assert!(matches!(err, PolicyError::UnknownCategory(DocCategory::Icon)));
    }

    #[test]
    fn test_mime_ignored_for_text_categories() {
        assert!(validate(DocCategory::Notice, 1_000, Some("application/pdf")).is_ok());
    }
}
