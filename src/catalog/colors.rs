//! Color Variants
//!
//! A color is the stock-keeping level of the catalogue: it carries stock,
//! pricing per currency and the image sets shown on the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        images::{Image, ImageChanges},
        models::ModelId,
    },
    ids::TypedId,
};

/// Color id
pub type ColorId = TypedId<ColorVariant>;

/// Price entry as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPrice {
    /// ISO currency code.
    pub currency: String,

    /// List price.
    pub price: Decimal,

    /// Discount applied by the backend.
    #[serde(default)]
    pub discount: Decimal,

    /// Derived by the backend from price and discount; never written.
    #[serde(default, skip_serializing)]
    pub final_price: Option<Decimal>,
}

/// Writable part of a price entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    /// ISO currency code.
    pub currency: String,

    /// List price, greater than zero.
    pub price: Decimal,

    /// Discount, zero or more.
    pub discount: Decimal,
}

impl From<&ColorPrice> for PriceInput {
    fn from(price: &ColorPrice) -> Self {
        Self {
            currency: price.currency.clone(),
            price: price.price,
            discount: price.discount,
        }
    }
}

/// Color Variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariant {
    /// Color id.
    #[serde(alias = "_id", alias = "id")]
    pub color_id: ColorId,

    /// Owning model.
    #[serde(default)]
    pub model_id: Option<ModelId>,

    /// Display name, e.g. `Matte Black`.
    pub color_name: String,

    /// Units on hand.
    #[serde(default)]
    pub stock: u32,

    /// Thumbnail used across list views.
    #[serde(default)]
    pub color_image: Option<Image>,

    /// Product shots.
    #[serde(default)]
    pub product_images: Vec<Image>,

    /// Gallery shots.
    #[serde(default)]
    pub gallery_images: Vec<Image>,

    /// Price per currency.
    #[serde(default)]
    pub color_price: Vec<ColorPrice>,
}

impl ColorVariant {
    /// Price entry for `currency`, if the color is sold in it.
    #[must_use]
    pub fn price_in(&self, currency: &str) -> Option<&ColorPrice> {
        self.color_price
            .iter()
            .find(|price| price.currency.eq_ignore_ascii_case(currency))
    }
}

/// Body of a color `details` update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDetailsUpdate {
    /// Display name.
    pub color_name: String,

    /// Units on hand.
    pub stock: u32,

    /// Writable price entries.
    pub color_price: Vec<PriceInput>,
}

/// A color ready to be created: its fields plus the initial images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColor {
    /// Name, stock and pricing.
    pub details: ColorDetailsUpdate,

    /// Initial uploads; always carries a main image.
    pub images: ImageChanges,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn final_price_is_read_but_never_written() -> TestResult {
        let price: ColorPrice = serde_json::from_value(json!({
            "currency": "INR",
            "price": 15000,
            "discount": 500,
            "finalPrice": 14500
        }))?;

        assert_eq!(price.final_price, Some(Decimal::from(14500)));

        let written = serde_json::to_value(&price)?;

        assert!(written.get("finalPrice").is_none());

        Ok(())
    }

    #[test]
    fn decodes_color_with_mongo_style_id() -> TestResult {
        let color: ColorVariant = serde_json::from_value(json!({
            "_id": "c1",
            "colorName": "Blue",
            "stock": 4,
            "colorImage": "https://cdn.example.com/blue.png",
            "colorPrice": [{ "currency": "INR", "price": 100 }]
        }))?;

        assert_eq!(color.color_id.as_str(), "c1");
        assert_eq!(color.stock, 4);
        assert!(color.price_in("inr").is_some());
        assert!(color.price_in("USD").is_none());

        Ok(())
    }
}
