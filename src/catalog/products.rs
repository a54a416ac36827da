//! Products

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        images::Image,
        models::{Model, ModelId},
        status::ListingStatus,
    },
    ids::TypedId,
};

/// Product id
pub type ProductId = TypedId<Product>;

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    #[serde(alias = "_id", alias = "productId")]
    pub id: ProductId,

    /// Display title.
    pub product_title: String,

    /// Free-text category label.
    #[serde(default)]
    pub product_category: Option<String>,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,

    /// Base list price entered when the product was created.
    #[serde(default)]
    pub price: Option<Decimal>,

    /// Base discount.
    #[serde(default)]
    pub discount: Option<Decimal>,

    /// Derived by the backend.
    #[serde(default, skip_serializing)]
    pub final_price: Option<Decimal>,

    /// Models, when the endpoint embeds them.
    #[serde(default)]
    pub models: Vec<Model>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Product {
    /// Look up one of the embedded models.
    #[must_use]
    pub fn model(&self, model: &ModelId) -> Option<&Model> {
        self.models.iter().find(|candidate| &candidate.model_id == model)
    }

    /// Thumbnail of the first model that has one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&Image> {
        self.models.iter().find_map(Model::thumbnail)
    }
}

/// Product creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display title.
    pub product_title: String,

    /// Category label, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,

    /// Long description.
    pub description: String,

    /// Initial publication state.
    pub status: ListingStatus,

    /// Currency of the base price.
    pub currency: String,

    /// Base list price.
    pub price: Decimal,

    /// Base discount.
    pub discount: Decimal,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_minimal_product() -> TestResult {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "productTitle": "ICU Bed"
        }))?;

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.product_category, None);
        assert!(product.models.is_empty());
        assert!(product.thumbnail().is_none());

        Ok(())
    }

    #[test]
    fn decodes_timestamps() -> TestResult {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "productTitle": "Monitor",
            "createdAt": "2026-03-01T10:00:00Z"
        }))?;

        assert!(product.created_at.is_some());

        Ok(())
    }

    #[test]
    fn model_lookup_by_id() -> TestResult {
        let product: Product = serde_json::from_value(json!({
            "id": "p3",
            "productTitle": "Monitor",
            "models": [{ "modelId": "m1", "modelName": "MX-12" }]
        }))?;

        assert!(product.model(&ModelId::new("m1")).is_some());
        assert!(product.model(&ModelId::new("m9")).is_none());

        Ok(())
    }
}
