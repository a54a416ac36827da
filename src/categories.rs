//! Categories
//!
//! Categories are free text. The picker offers whatever labels already exist
//! in fetched records, minus configured exclusions, and a separate free-text
//! field for a brand new label.

use std::collections::BTreeSet;

use crate::catalog::{Accessory, Product};

/// Labels hidden from the picker unless configured otherwise.
pub const DEFAULT_EXCLUDED_CATEGORIES: &[&str] = &["SPO2"];

/// Something carrying a category label.
pub trait Categorized {
    /// The label, if any.
    fn category(&self) -> Option<&str>;
}

impl Categorized for Product {
    fn category(&self) -> Option<&str> {
        self.product_category.as_deref()
    }
}

impl Categorized for Accessory {
    fn category(&self) -> Option<&str> {
        self.product_category.as_deref()
    }
}

impl Categorized for Option<String> {
    fn category(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl Categorized for Option<&str> {
    fn category(&self) -> Option<&str> {
        *self
    }
}

/// Sorted, de-duplicated labels found in `items`, skipping blanks and `excluded`.
pub fn available_categories<'a, T, I, E>(items: I, excluded: &[E]) -> Vec<String>
where
    T: Categorized + 'a,
    I: IntoIterator<Item = &'a T>,
    E: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(Categorized::category)
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .filter(|category| !excluded.iter().any(|skip| skip.as_ref() == *category))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The category a form submits: the free-text entry wins over the picker.
#[must_use]
pub fn resolve_category(selected: &str, new_category: &str) -> Option<String> {
    [new_category, selected]
        .into_iter()
        .map(str::trim)
        .find(|category| !category.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_sorts_and_skips_exclusions() {
        let categories = [
            Some("A".to_string()),
            Some("A".to_string()),
            Some("SPO2".to_string()),
            Some("B".to_string()),
            None,
        ];

        assert_eq!(
            available_categories(&categories, DEFAULT_EXCLUDED_CATEGORIES),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn blank_labels_are_ignored() {
        let categories = [Some("  "), Some("Monitors"), Some("")];

        assert_eq!(
            available_categories(&categories, &[] as &[&str]),
            vec!["Monitors".to_string()]
        );
    }

    #[test]
    fn exclusions_are_configurable() {
        let categories = [Some("SPO2"), Some("Beds")];
        let excluded = vec!["Beds".to_string()];

        assert_eq!(
            available_categories(&categories, excluded.as_slice()),
            vec!["SPO2".to_string()]
        );
    }

    #[test]
    fn new_category_takes_precedence() {
        assert_eq!(resolve_category("Beds", " Ventilators "), Some("Ventilators".to_string()));
        assert_eq!(resolve_category("Beds", ""), Some("Beds".to_string()));
        assert_eq!(resolve_category(" ", ""), None);
    }
}
