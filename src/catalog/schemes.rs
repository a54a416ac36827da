//! Schemes
//!
//! Promotional buckets a model can be flagged under.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named promotional bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    /// On sale.
    SaleProduct,

    /// Trading / wholesale listing.
    TradingProduct,

    /// Recommended on the storefront.
    RecommendedProduct,

    /// Company's own products.
    CompanyProduct,

    /// Value picks.
    ValuableProduct,
}

impl Scheme {
    /// Every scheme, in display order.
    pub const ALL: [Self; 5] = [
        Self::SaleProduct,
        Self::TradingProduct,
        Self::RecommendedProduct,
        Self::CompanyProduct,
        Self::ValuableProduct,
    ];

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SaleProduct => "saleProduct",
            Self::TradingProduct => "tradingProduct",
            Self::RecommendedProduct => "recommendedProduct",
            Self::CompanyProduct => "companyProduct",
            Self::ValuableProduct => "valuableProduct",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown scheme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scheme: {0}")]
pub struct ParseSchemeError(pub String);

impl FromStr for Scheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|scheme| {
                scheme.as_str().eq_ignore_ascii_case(wanted)
                    || scheme
                        .as_str()
                        .trim_end_matches("Product")
                        .eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseSchemeError(wanted.to_string()))
    }
}

/// The `schem` map attached to model details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the backend's flat boolean map."
)]
pub struct SchemeFlags {
    /// `saleProduct`
    pub sale_product: bool,

    /// `tradingProduct`
    pub trading_product: bool,

    /// `recommendedProduct`
    pub recommended_product: bool,

    /// `companyProduct`
    pub company_product: bool,

    /// `valuableProduct`
    pub valuable_product: bool,
}

impl SchemeFlags {
    /// Whether `scheme` is on.
    #[must_use]
    pub fn get(&self, scheme: Scheme) -> bool {
        match scheme {
            Scheme::SaleProduct => self.sale_product,
            Scheme::TradingProduct => self.trading_product,
            Scheme::RecommendedProduct => self.recommended_product,
            Scheme::CompanyProduct => self.company_product,
            Scheme::ValuableProduct => self.valuable_product,
        }
    }

    /// Turn `scheme` on or off.
    pub fn set(&mut self, scheme: Scheme, enabled: bool) {
        let flag = match scheme {
            Scheme::SaleProduct => &mut self.sale_product,
            Scheme::TradingProduct => &mut self.trading_product,
            Scheme::RecommendedProduct => &mut self.recommended_product,
            Scheme::CompanyProduct => &mut self.company_product,
            Scheme::ValuableProduct => &mut self.valuable_product,
        };

        *flag = enabled;
    }

    /// The update that flips `scheme`, without applying it.
    #[must_use]
    pub fn toggled(&self, scheme: Scheme) -> SchemeUpdate {
        SchemeUpdate {
            scheme,
            enabled: !self.get(scheme),
        }
    }

    /// Schemes currently on.
    pub fn enabled(&self) -> impl Iterator<Item = Scheme> + '_ {
        Scheme::ALL.into_iter().filter(|scheme| self.get(*scheme))
    }
}

/// Targeted partial update of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeUpdate {
    /// Flag to change.
    pub scheme: Scheme,

    /// New value.
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn toggled_flips_current_value() {
        let mut flags = SchemeFlags::default();

        assert!(flags.toggled(Scheme::SaleProduct).enabled);

        flags.set(Scheme::SaleProduct, true);

        assert!(!flags.toggled(Scheme::SaleProduct).enabled);
    }

    #[test]
    fn enabled_lists_set_flags() {
        let mut flags = SchemeFlags::default();

        flags.set(Scheme::CompanyProduct, true);
        flags.set(Scheme::ValuableProduct, true);

        assert_eq!(
            flags.enabled().collect::<Vec<_>>(),
            vec![Scheme::CompanyProduct, Scheme::ValuableProduct]
        );
    }

    #[test]
    fn decodes_partial_map() -> TestResult {
        let flags: SchemeFlags = serde_json::from_value(json!({ "recommendedProduct": true }))?;

        assert!(flags.recommended_product);
        assert!(!flags.sale_product);

        Ok(())
    }

    #[test]
    fn parses_short_and_wire_names() -> TestResult {
        assert_eq!("sale".parse::<Scheme>()?, Scheme::SaleProduct);
        assert_eq!("tradingProduct".parse::<Scheme>()?, Scheme::TradingProduct);
        assert!("clearance".parse::<Scheme>().is_err());

        Ok(())
    }
}
