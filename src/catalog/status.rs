//! Listing Status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Publication state of a product, model or accessory.
///
/// The backend spells the pending state `Padding`; both spellings are accepted
/// on the way in and `Padding` is written back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    /// Visible on the storefront.
    #[serde(alias = "live", alias = "LIVE")]
    Live,

    /// Awaiting review.
    #[default]
    #[serde(rename = "Padding", alias = "Pending", alias = "pending", alias = "padding")]
    Pending,

    /// Listed for enquiries only, without a buy action.
    #[serde(alias = "enquiry")]
    Enquiry,
}

impl ListingStatus {
    /// Wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Pending => "Padding",
            Self::Enquiry => "Enquiry",
        }
    }
}

impl Display for ListingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Live => "live",
            Self::Pending => "pending",
            Self::Enquiry => "enquiry",
        })
    }
}

/// Unknown status or filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ListingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "pending" | "padding" => Ok(Self::Pending),
            "enquiry" => Ok(Self::Enquiry),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Which slice of a collection a list view fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Everything regardless of status.
    #[default]
    All,

    /// Only pending records.
    Pending,

    /// Only live records.
    Live,
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Live => "live",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" | "padding" => Ok(Self::Pending),
            "live" => Ok(Self::Live),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
