//! Accessory Basic Info

use rust_decimal::Decimal;

use crate::{
    catalog::{Accessory, ListingStatus, NewAccessory},
    categories::resolve_category,
    forms::SectionForm,
    validation::{ValidationError, non_negative, require_positive, require_text},
};

/// First stage of the accessory wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessoryForm {
    /// Display title.
    pub product_title: String,

    /// Category picked from existing labels.
    pub product_category: String,

    /// Free-text category; wins over the picker when filled.
    pub new_category: String,

    /// Long description.
    pub description: String,

    /// List price; required and greater than zero.
    pub price: Option<Decimal>,

    /// Optional discount.
    pub discount: Option<Decimal>,

    /// Units on hand.
    pub stock: u32,

    /// Publication state.
    pub status: ListingStatus,
}

impl AccessoryForm {
    /// Prefill from an existing record for editing.
    #[must_use]
    pub fn from_accessory(accessory: &Accessory) -> Self {
        Self {
            product_title: accessory.product_title.clone(),
            product_category: accessory.product_category.clone().unwrap_or_default(),
            new_category: String::new(),
            description: accessory.description.clone(),
            price: Some(accessory.price),
            discount: Some(accessory.discount),
            stock: accessory.stock,
            status: accessory.status,
        }
    }
}

impl SectionForm for AccessoryForm {
    type Payload = NewAccessory;

    fn section(&self) -> &'static str {
        "basic info"
    }

    fn validate(&self) -> Result<NewAccessory, ValidationError> {
        Ok(NewAccessory {
            product_title: require_text("productTitle", &self.product_title)?,
            product_category: resolve_category(&self.product_category, &self.new_category),
            description: require_text("description", &self.description)?,
            price: require_positive("price", self.price)?,
            discount: non_negative("discount", self.discount)?,
            stock: self.stock,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn zero_price_is_rejected() {
        let form = AccessoryForm {
            product_title: "Gloves".to_string(),
            description: "Nitrile, box of 100".to_string(),
            price: Some(Decimal::ZERO),
            ..AccessoryForm::default()
        };

        assert_eq!(form.validate(), Err(ValidationError::NotPositive("price")));
    }

    #[test]
    fn complete_form_validates() -> TestResult {
        let form = AccessoryForm {
            product_title: "Gloves".to_string(),
            product_category: "Consumables".to_string(),
            description: "Nitrile, box of 100".to_string(),
            price: Some(Decimal::from(250)),
            stock: 40,
            ..AccessoryForm::default()
        };

        let accessory = form.validate()?;

        assert_eq!(accessory.product_category.as_deref(), Some("Consumables"));
        assert_eq!(accessory.discount, Decimal::ZERO);

        Ok(())
    }
}
