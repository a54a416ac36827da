//! Models
//!
//! A model is a variant of a product (e.g. a monitor's 12" and 15" sizes). It
//! cannot exist without its parent product.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        colors::ColorVariant, details::ModelDetails, images::Image, products::ProductId,
        status::ListingStatus,
    },
    ids::TypedId,
};

/// Model id
pub type ModelId = TypedId<Model>;

/// Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model id.
    #[serde(alias = "_id", alias = "id")]
    pub model_id: ModelId,

    /// Parent product.
    #[serde(default)]
    pub product_id: Option<ProductId>,

    /// Display name.
    pub model_name: String,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,

    /// Colors, in creation order.
    #[serde(default)]
    pub colors: Vec<ColorVariant>,

    /// Specifications, features, warranty and schemes.
    #[serde(default, alias = "modelDetails")]
    pub details: ModelDetails,
}

impl Model {
    /// The first color's main image, used as the row thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&Image> {
        self.colors.first()?.color_image.as_ref()
    }

    /// Stock across every color.
    #[must_use]
    pub fn total_stock(&self) -> u64 {
        self.colors.iter().map(|color| u64::from(color.stock)).sum()
    }
}

/// Model creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModel {
    /// Display name.
    pub model_name: String,

    /// Initial publication state.
    pub status: ListingStatus,
}

/// Body of a model status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// New state.
    pub status: ListingStatus,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn thumbnail_comes_from_first_color() -> TestResult {
        let model: Model = serde_json::from_value(json!({
            "modelId": "m1",
            "modelName": "MX-12",
            "status": "Live",
            "colors": [
                { "colorId": "c1", "colorName": "Black", "stock": 2, "colorImage": "https://cdn.example.com/black.png" },
                { "colorId": "c2", "colorName": "White", "stock": 3, "colorImage": "https://cdn.example.com/white.png" }
            ]
        }))?;

        assert_eq!(
            model.thumbnail().map(|image| image.url.as_str()),
            Some("https://cdn.example.com/black.png")
        );
        assert_eq!(model.total_stock(), 5);

        Ok(())
    }

    #[test]
    fn model_without_colors_has_no_thumbnail() -> TestResult {
        let model: Model = serde_json::from_value(json!({ "_id": "m2", "modelName": "Bare" }))?;

        assert!(model.thumbnail().is_none());
        assert_eq!(model.status, ListingStatus::Pending);

        Ok(())
    }
}
