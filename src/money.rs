//! Money
//!
//! Prices travel as decimals alongside an ISO currency code. The store only
//! trades in a handful of currencies, so anything else is rejected up front.

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Currency assumed when a form leaves it blank.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Currency lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The code is not one the store sells in.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Resolve a currency code, case-insensitively.
///
/// # Errors
///
/// Returns `CurrencyError::Unsupported` for codes outside the supported set.
pub fn find_currency(code: &str) -> Result<&'static Currency, CurrencyError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(iso::INR),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        "AED" => Ok(iso::AED),
        other => Err(CurrencyError::Unsupported(other.to_string())),
    }
}

/// Render an amount with its currency code, rounded to the currency's minor units.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &Currency) -> String {
    format!(
        "{} {}",
        amount.round_dp(currency.exponent),
        currency.iso_alpha_code
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn finds_supported_codes_case_insensitively() -> TestResult {
        assert_eq!(find_currency("inr")?, iso::INR);
        assert_eq!(find_currency(" USD ")?, iso::USD);

        Ok(())
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            find_currency("ABC"),
            Err(CurrencyError::Unsupported("ABC".to_string()))
        );
    }

    #[test]
    fn formats_to_minor_units() {
        assert_eq!(format_amount(Decimal::new(15_000_456, 3), iso::INR), "15000.46 INR");
    }
}
