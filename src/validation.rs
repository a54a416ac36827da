//! Validation
//!
//! Client-side checks that run before anything reaches the network.

use rust_decimal::Decimal;
use thiserror::Error;

/// A form field failed its local check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A mandatory field is empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// A numeric field must be strictly positive.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    /// A numeric field must not be negative.
    #[error("{0} cannot be negative")]
    Negative(&'static str),

    /// A field is present but malformed.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,

        /// What is wrong with it.
        reason: String,
    },
}

impl ValidationError {
    /// Name of the field the error should be shown next to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required(field)
            | Self::NotPositive(field)
            | Self::Negative(field)
            | Self::Invalid { field, .. } => field,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Returns the trimmed value, or `Required` when nothing is left.
///
/// # Errors
///
/// Returns `ValidationError::Required` for blank input.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }

    Ok(trimmed.to_string())
}

/// Requires an amount that is present and greater than zero.
///
/// # Errors
///
/// Returns `Required` when missing and `NotPositive` when zero or below.
pub fn require_positive(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, ValidationError> {
    let value = value.ok_or(ValidationError::Required(field))?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }

    Ok(value)
}

/// Optional amount defaulting to zero; negative values are rejected.
///
/// # Errors
///
/// Returns `Negative` for amounts below zero.
pub fn non_negative(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    let value = value.unwrap_or(Decimal::ZERO);

    if value < Decimal::ZERO {
        return Err(ValidationError::Negative(field));
    }

    Ok(value)
}
