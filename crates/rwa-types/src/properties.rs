//! Category-specific property payloads
//!
//! Each category carries its own structured property block inside the
//! uploaded object. The JSON wire format is untagged: the `category` field
//! of the enclosing [`RwaObject`](crate::RwaObject) decides which shape the
//! block has.

use serde::{Deserialize, Serialize};

/// Issuer of the RWA. The obligatory first document for every asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerProperties {
    pub forename: String,
    pub lastname: String,
    pub company_position: String,
    pub company: String,
    pub address: String,
    pub country_of_registration: String,
    pub company_number: String,
    pub company_registration_link: String,
    pub email: String,
    pub telegram_group: String,
    pub website_url: String,
    pub x_account: String,
    pub telephone_country_prefix: String,
    pub telephone_number: String,
    pub lawracle_link: String,
}

/// Author of a notice to holders. The notice itself goes into the
/// enclosing object's `text` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeProperties {
    pub forename: String,
    pub lastname: String,
    pub position: String,
    pub email: String,
}

/// How the underlying asset is held: SPV, trust or company, plus the
/// statements proving the asset is uniquely tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceProperties {
    pub holding_entity: String,
    pub entity_type: String,
    pub country_of_registration: String,
    pub company_number: String,
    pub company_registration_link: String,
    pub asset_ownership_statement: String,
    pub token_uniqueness: String,
    pub lawracle_link: String,
}

/// Valuation statement with enough valuer detail for a holder to verify
/// its authenticity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationProperties {
    pub valuer_name: String,
    pub valuer_address: String,
    pub valuer_country_of_registration: String,
    pub valuer_company_number: String,
    pub company_registration_link: String,
    pub valuer_email: String,
    pub valuer_website: String,
    pub valuer_telephone_country_code: String,
    pub valuer_telephone_number: String,
    pub valuation_per_unit: String,
    pub valuation_currency: String,
}

/// Credit rating by a recognized ratings agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingProperties {
    pub agency_name: String,
    pub agency_address: String,
    pub agency_country_of_registration: String,
    pub agency_company_number: String,
    pub company_registration_link: String,
    pub agency_email: String,
    pub agency_website: String,
    pub agency_telephone_country_code: String,
    pub agency_telephone_number: String,
    pub credit_rating: String,
    pub expiry_date: String,
}

/// Legal statement regarding the asset or the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalProperties {
    pub forename: String,
    pub lastname: String,
    pub position: String,
    pub email: String,
    pub lawracle_link: String,
}

/// Financial statement produced by a recognized accountancy firm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProperties {
    pub accountancy_name: String,
    pub accountancy_address: String,
    pub accountancy_email: String,
    pub accountancy_website: String,
    pub accountancy_company_number: String,
    pub accountancy_registration_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectusProperties {
    pub version: String,
}

/// The security license together with the issuing authority details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseProperties {
    pub licensing_authority: String,
    pub license_number: String,
    pub authority_website: String,
    pub license_link: String,
}

/// Competency statement on the issuer by a management consultancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDiligenceProperties {
    pub company_name: String,
    pub company_address: String,
    pub company_email: String,
    pub company_website: String,
    pub company_number: String,
    pub company_registration_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendProperties {
    pub forename: String,
    pub lastname: String,
    pub position: String,
    pub email: String,
}

/// How a holder swaps tokens back for the underlying asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionProperties {
    pub contact_forename: String,
    pub contact_lastname: String,
    pub contact_position: String,
    pub contact_email: String,
    pub fee_currency: String,
    pub fixed_fee: String,
    pub variable_fee_per_unit: String,
    pub redemption_time_completion: String,
    pub redemption_conditions: String,
}

/// Who may legally invest: KYC requirements, investor category and
/// jurisdiction restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoCanInvestProperties {
    #[serde(rename = "KYC_required")]
    pub kyc_required: bool,
    pub investor_category: String,
    pub investor_country_list: Vec<String>,
    pub max_number_of_investors: u64,
    pub prohibited_jurisdictions: Vec<String>,
}

/// Binary media payload, base64-encoded. Used for IMAGE, VIDEO and ICON
/// categories; `media_type` must carry the declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaProperties {
    pub media_name: String,
    pub media_type: String,
    pub media_data: String,
}

/// The per-category property block.
///
/// Serialized untagged: the enclosing object's `category` field is the
/// discriminant. Variants with identical field sets (Notice/Dividend)
/// deserialize to whichever comes first, which is harmless because their
/// wire shape is the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Properties {
    Issuer(IssuerProperties),
    Provenance(ProvenanceProperties),
    Valuation(ValuationProperties),
    Rating(RatingProperties),
    Redemption(RedemptionProperties),
    WhoCanInvest(WhoCanInvestProperties),
    Financial(FinancialProperties),
    DueDiligence(DueDiligenceProperties),
    Legal(LegalProperties),
    Notice(NoticeProperties),
    Dividend(DividendProperties),
    License(LicenseProperties),
    Media(MediaProperties),
    Prospectus(ProspectusProperties),
}

impl Properties {
    /// Declared MIME type, present only for media payloads.
    pub fn declared_mime_type(&self) -> Option<&str> {
        match self {
            Self::Media(media) => Some(&media.media_type),
            _ => None,
        }
    }
}
