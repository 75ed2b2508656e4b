//! Document categories and types with their fixed wire ordinals
//!
//! The registry contract stores categories and types as small integers.
//! The mapping below is part of the wire format: fee types, counters and
//! descriptor fields all key off these ordinals, so they must never be
//! reordered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document category recognized by the registry contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocCategory {
    /// Issuer statement - the obligatory first document for every asset
    Issuer,
    /// How the underlying asset is held and tokenized
    Provenance,
    /// Valuation statement by a recognized valuer
    Valuation,
    /// Offering prospectus
    Prospectus,
    /// Credit rating by a ratings agency
    Rating,
    /// Legal statement regarding the asset or issuer
    Legal,
    /// Financial statement (balance sheet, P&L, ...)
    Financial,
    /// Security license issued by an authority
    License,
    /// Due diligence report on the issuer
    DueDiligence,
    /// Free-form notice from the issuer to holders
    Notice,
    /// Dividend distribution statement
    Dividend,
    /// Redemption terms for swapping tokens back to the asset
    Redemption,
    /// Who may legally invest in this asset
    WhoCanInvest,
    /// Image associated with the asset or one of its slots
    Image,
    /// Video associated with the asset or one of its slots
    Video,
    /// Icon for the asset
    Icon,
}

/// Document type: bound to the whole contract or to a single slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocType {
    Contract,
    Slot,
}

impl DocCategory {
    /// Wire ordinal as stored by the registry contract
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Issuer => 0,
            Self::Provenance => 1,
            Self::Valuation => 2,
            Self::Prospectus => 3,
            Self::Rating => 4,
            Self::Legal => 5,
            Self::Financial => 6,
            Self::License => 7,
            Self::DueDiligence => 8,
            Self::Notice => 9,
            Self::Dividend => 10,
            Self::Redemption => 11,
            Self::WhoCanInvest => 12,
            Self::Image => 13,
            Self::Video => 14,
            Self::Icon => 15,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal)
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Issuer),
            1 => Some(Self::Provenance),
            2 => Some(Self::Valuation),
            3 => Some(Self::Prospectus),
            4 => Some(Self::Rating),
            5 => Some(Self::Legal),
            6 => Some(Self::Financial),
            7 => Some(Self::License),
            8 => Some(Self::DueDiligence),
            9 => Some(Self::Notice),
            10 => Some(Self::Dividend),
            11 => Some(Self::Redemption),
            12 => Some(Self::WhoCanInvest),
            13 => Some(Self::Image),
            14 => Some(Self::Video),
            15 => Some(Self::Icon),
            _ => None,
        }
    }
}

impl DocType {
    /// Wire ordinal as stored by the registry contract
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Contract => 0,
            Self::Slot => 1,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal)
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Contract),
            1 => Some(Self::Slot),
            _ => None,
        }
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Issuer => "ISSUER",
            Self::Provenance => "PROVENANCE",
            Self::Valuation => "VALUATION",
            Self::Prospectus => "PROSPECTUS",
            Self::Rating => "RATING",
            Self::Legal => "LEGAL",
            Self::Financial => "FINANCIAL",
            Self::License => "LICENSE",
            Self::DueDiligence => "DUEDILIGENCE",
            Self::Notice => "NOTICE",
            Self::Dividend => "DIVIDEND",
            Self::Redemption => "REDEMPTION",
            Self::WhoCanInvest => "WHOCANINVEST",
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Icon => "ICON",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract => write!(f, "CONTRACT"),
            Self::Slot => write!(f, "SLOT"),
        }
    }
}
