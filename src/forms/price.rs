//! Price Field

use rust_decimal::Decimal;

use crate::{
    catalog::colors::{ColorPrice, PriceInput},
    money::{DEFAULT_CURRENCY, find_currency},
    validation::{ValidationError, non_negative, require_positive},
};

/// Price, discount and currency as typed into a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceField {
    /// ISO code; blank means the default currency.
    pub currency: String,

    /// List price; required and greater than zero.
    pub price: Option<Decimal>,

    /// Optional discount.
    pub discount: Option<Decimal>,
}

impl Default for PriceField {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            price: None,
            discount: None,
        }
    }
}

impl PriceField {
    /// A price in the default currency.
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// Validate into the writable price entry.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported currency, a missing or non-positive
    /// price, or a negative discount.
    pub fn validate(&self) -> Result<PriceInput, ValidationError> {
        let code = if self.currency.trim().is_empty() {
            DEFAULT_CURRENCY
        } else {
            self.currency.trim()
        };

        let currency = find_currency(code)
            .map_err(|error| ValidationError::invalid("currency", error.to_string()))?;

        Ok(PriceInput {
            currency: currency.iso_alpha_code.to_string(),
            price: require_positive("price", self.price)?,
            discount: non_negative("discount", self.discount)?,
        })
    }
}

impl From<&ColorPrice> for PriceField {
    fn from(price: &ColorPrice) -> Self {
        Self {
            currency: price.currency.clone(),
            price: Some(price.price),
            discount: Some(price.discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_price_is_required() {
        assert_eq!(
            PriceField::default().validate(),
            Err(ValidationError::Required("price"))
        );
    }

    #[test]
    fn blank_currency_falls_back_to_default() -> TestResult {
        let field = PriceField {
            currency: String::new(),
            ..PriceField::new(Decimal::from(15000))
        };

        let input = field.validate()?;

        assert_eq!(input.currency, DEFAULT_CURRENCY);
        assert_eq!(input.discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn unsupported_currency_is_invalid() {
        let field = PriceField {
            currency: "XYZ".to_string(),
            ..PriceField::new(Decimal::ONE)
        };

        assert!(matches!(
            field.validate(),
            Err(ValidationError::Invalid { field: "currency", .. })
        ));
    }
}
