//! Product Basic Info

use crate::{
    catalog::{ListingStatus, NewProduct, Product},
    categories::resolve_category,
    forms::{SectionForm, price::PriceField},
    validation::{ValidationError, require_text},
};

/// First stage of the product wizard, also the "basic info" edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Display title.
    pub product_title: String,

    /// Category picked from existing labels.
    pub product_category: String,

    /// Free-text category; wins over the picker when filled.
    pub new_category: String,

    /// Long description.
    pub description: String,

    /// Publication state.
    pub status: ListingStatus,

    /// Base price.
    pub price: PriceField,
}

impl ProductForm {
    /// Prefill from an existing record for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_title: product.product_title.clone(),
            product_category: product.product_category.clone().unwrap_or_default(),
            new_category: String::new(),
            description: product.description.clone(),
            status: product.status,
            price: PriceField {
                price: product.price,
                discount: product.discount,
                ..PriceField::default()
            },
        }
    }
}

impl SectionForm for ProductForm {
    type Payload = NewProduct;

    fn section(&self) -> &'static str {
        "basic info"
    }

    fn validate(&self) -> Result<NewProduct, ValidationError> {
        let product_title = require_text("productTitle", &self.product_title)?;
        let description = require_text("description", &self.description)?;
        let price = self.price.validate()?;

        Ok(NewProduct {
            product_title,
            product_category: resolve_category(&self.product_category, &self.new_category),
            description,
            status: self.status,
            currency: price.currency,
            price: price.price,
            discount: price.discount,
        })
    }
}
