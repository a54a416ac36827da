//! Accessories
//!
//! Accessories are flat products: no models or colors, just one price, one
//! stock count and the same array sections a model has.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        details::{KeyValue, Point},
        images::Image,
        status::ListingStatus,
    },
    ids::TypedId,
};

/// Accessory id
pub type AccessoryId = TypedId<Accessory>;

/// Accessory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    /// Accessory id.
    #[serde(alias = "_id")]
    pub id: AccessoryId,

    /// Free-text category label.
    #[serde(default)]
    pub product_category: Option<String>,

    /// Display title.
    pub product_title: String,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// List price.
    #[serde(default)]
    pub price: Decimal,

    /// Discount.
    #[serde(default)]
    pub discount: Decimal,

    /// Derived by the backend.
    #[serde(default, skip_serializing)]
    pub final_price: Option<Decimal>,

    /// Units on hand.
    #[serde(default)]
    pub stock: u32,

    /// Headline specifications.
    #[serde(default)]
    pub specifications: Vec<Point>,

    /// Warranty terms.
    #[serde(default)]
    pub warranty: Vec<Point>,

    /// Labelled technical specifications.
    #[serde(default)]
    pub product_specifications: Vec<KeyValue>,

    /// Product shots.
    #[serde(default)]
    pub product_images: Vec<Image>,

    /// Gallery shots.
    #[serde(default)]
    pub gallery_images: Vec<Image>,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,
}

impl Accessory {
    /// First product image, used as the row thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&Image> {
        self.product_images.first()
    }
}

/// Accessory creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccessory {
    /// Display title.
    pub product_title: String,

    /// Category label, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,

    /// Long description.
    pub description: String,

    /// List price.
    pub price: Decimal,

    /// Discount.
    pub discount: Decimal,

    /// Units on hand.
    pub stock: u32,

    /// Initial publication state.
    pub status: ListingStatus,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_accessory_with_sections() -> TestResult {
        let accessory: Accessory = serde_json::from_value(json!({
            "_id": "a1",
            "productTitle": "Surgical Gloves",
            "productCategory": "Consumables",
            "price": 250,
            "stock": 40,
            "warranty": [{ "points": "None" }],
            "productImages": ["https://cdn.example.com/gloves.png"],
            "status": "Live"
        }))?;

        assert_eq!(accessory.id.as_str(), "a1");
        assert_eq!(accessory.warranty, vec![Point::new("None")]);
        assert_eq!(
            accessory.thumbnail().map(|image| image.url.as_str()),
            Some("https://cdn.example.com/gloves.png")
        );
        assert_eq!(accessory.status, ListingStatus::Live);

        Ok(())
    }
}
