//! Search
//!
//! Client-side filtering of an already fetched collection. Searching never
//! goes back to the server.

use smallvec::{SmallVec, smallvec};

use crate::catalog::{Accessory, Product};

/// Something a list view can search.
pub trait Searchable {
    /// Text fields matched against the query.
    fn search_fields(&self) -> SmallVec<[&str; 4]>;
}

impl Searchable for Product {
    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![self.product_title.as_str()];

        fields.extend(self.product_category.as_deref());
        fields.extend(self.models.iter().map(|model| model.model_name.as_str()));

        fields
    }
}

impl Searchable for Accessory {
    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![self.product_title.as_str()];

        fields.extend(self.product_category.as_deref());

        fields
    }
}

/// Case-insensitive substring match over `item`'s fields. A blank query matches everything.
pub fn matches_query<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return true;
    }

    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items of `items` matching `query`, in their original order.
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Titled(&'static str);

    impl Searchable for Titled {
        fn search_fields(&self) -> SmallVec<[&str; 4]> {
            smallvec![self.0]
        }
    }

    #[test]
    fn substring_match_ignores_case() {
        let items = [Titled("Surgical Gloves"), Titled("ICU Bed")];

        let lower = search(&items, "glov");
        let upper = search(&items, "GLOV");

        assert_eq!(lower.iter().map(|item| item.0).collect::<Vec<_>>(), vec!["Surgical Gloves"]);
        assert_eq!(upper.iter().map(|item| item.0).collect::<Vec<_>>(), vec!["Surgical Gloves"]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let items = [Titled("Surgical Gloves"), Titled("ICU Bed")];

        assert_eq!(search(&items, "  ").len(), 2);
    }

    #[test]
    fn product_matches_on_model_name_and_category() -> TestResult {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "productTitle": "Patient Monitor",
            "productCategory": "Monitoring",
            "models": [{ "modelId": "m1", "modelName": "PM-9000" }]
        }))?;

        assert!(matches_query(&product, "pm-9"));
        assert!(matches_query(&product, "monitoring"));
        assert!(!matches_query(&product, "ventilator"));

        Ok(())
    }
}
