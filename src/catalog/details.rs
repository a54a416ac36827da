//! Model Details
//!
//! Array-valued attribute groups. Every save replaces a whole section; the
//! backend never merges rows.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::schemes::SchemeFlags,
    sections::{Row, RowError},
};

/// One bullet point, e.g. a specification or warranty line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Bullet text.
    #[serde(default)]
    pub points: String,
}

impl Point {
    /// Build a bullet from text.
    pub fn new(points: impl Into<String>) -> Self {
        Self {
            points: points.into(),
        }
    }
}

/// A labelled attribute, e.g. `Weight: 4 kg`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Attribute label.
    #[serde(default)]
    pub key: String,

    /// Attribute value.
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    /// Build a labelled attribute.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Row for Point {
    const FIELDS: &'static [&'static str] = &["points"];

    fn is_blank(&self) -> bool {
        self.points.trim().is_empty()
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), RowError> {
        match field {
            "points" => {
                self.points = value;
                Ok(())
            }
            other => Err(RowError::UnknownField(other.to_string())),
        }
    }
}

impl Row for KeyValue {
    const FIELDS: &'static [&'static str] = &["key", "value"];

    fn is_blank(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), RowError> {
        match field {
            "key" => self.key = value,
            "value" => self.value = value,
            other => return Err(RowError::UnknownField(other.to_string())),
        }

        Ok(())
    }
}

/// Everything a model carries besides its colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelDetails {
    /// Headline specifications.
    pub specifications: Vec<Point>,

    /// Labelled technical specifications.
    pub product_specifications: Vec<KeyValue>,

    /// Labelled features.
    pub product_features: Vec<KeyValue>,

    /// Warranty terms.
    pub warranty: Vec<Point>,

    /// Scheme membership.
    pub schem: SchemeFlags,
}

impl ModelDetails {
    /// Apply a saved section locally so the cached copy matches the server.
    pub fn apply(&mut self, update: &DetailsUpdate) {
        match (&update.section, &update.data) {
            (DetailSection::Specifications, SectionData::Points(rows)) => {
                self.specifications.clone_from(rows);
            }
            (DetailSection::Warranty, SectionData::Points(rows)) => {
                self.warranty.clone_from(rows);
            }
            (DetailSection::ProductSpecifications, SectionData::Pairs(rows)) => {
                self.product_specifications.clone_from(rows);
            }
            (DetailSection::ProductFeatures, SectionData::Pairs(rows)) => {
                self.product_features.clone_from(rows);
            }
            // `DetailsUpdate` constructors never pair a section with the wrong row shape.
            _ => {}
        }
    }
}

/// Addressable array section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailSection {
    /// `specifications`, bullet rows.
    Specifications,

    /// `productSpecifications`, labelled rows.
    ProductSpecifications,

    /// `productFeatures`, labelled rows.
    ProductFeatures,

    /// `warranty`, bullet rows.
    Warranty,
}

impl DetailSection {
    /// Every section, in display order.
    pub const ALL: [Self; 4] = [
        Self::Specifications,
        Self::ProductSpecifications,
        Self::ProductFeatures,
        Self::Warranty,
    ];

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Specifications => "specifications",
            Self::ProductSpecifications => "productSpecifications",
            Self::ProductFeatures => "productFeatures",
            Self::Warranty => "warranty",
        }
    }

    /// Whether the section holds bullet rows rather than labelled rows.
    #[must_use]
    pub fn holds_points(self) -> bool {
        matches!(self, Self::Specifications | Self::Warranty)
    }
}

impl Display for DetailSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Replacement rows for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    /// Bullet rows.
    Points(Vec<Point>),

    /// Labelled rows.
    Pairs(Vec<KeyValue>),
}

impl SectionData {
    /// Number of rows carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Points(rows) => rows.len(),
            Self::Pairs(rows) => rows.len(),
        }
    }

    /// Whether no rows are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `{ section, data }` body of a section update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsUpdate {
    /// Section being replaced.
    pub section: DetailSection,

    /// Full replacement array.
    pub data: SectionData,
}

impl DetailsUpdate {
    /// Replace a bullet section.
    ///
    /// # Errors
    ///
    /// Returns `RowError::WrongShape` when `section` holds labelled rows.
    pub fn points(section: DetailSection, rows: Vec<Point>) -> Result<Self, RowError> {
        if !section.holds_points() {
            return Err(RowError::WrongShape(section));
        }

        Ok(Self {
            section,
            data: SectionData::Points(rows),
        })
    }

    /// Replace a labelled section.
    ///
    /// # Errors
    ///
    /// Returns `RowError::WrongShape` when `section` holds bullet rows.
    pub fn pairs(section: DetailSection, rows: Vec<KeyValue>) -> Result<Self, RowError> {
        if section.holds_points() {
            return Err(RowError::WrongShape(section));
        }

        Ok(Self {
            section,
            data: SectionData::Pairs(rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn update_serializes_section_and_rows() -> TestResult {
        let update = DetailsUpdate::points(
            DetailSection::Specifications,
            vec![Point::new("Lightweight")],
        )?;

        assert_eq!(
            serde_json::to_value(&update)?,
            json!({ "section": "specifications", "data": [{ "points": "Lightweight" }] })
        );

        Ok(())
    }

    #[test]
    fn constructors_reject_mismatched_shapes() {
        assert!(matches!(
            DetailsUpdate::pairs(DetailSection::Warranty, Vec::new()),
            Err(RowError::WrongShape(DetailSection::Warranty))
        ));
        assert!(matches!(
            DetailsUpdate::points(DetailSection::ProductFeatures, Vec::new()),
            Err(RowError::WrongShape(DetailSection::ProductFeatures))
        ));
    }

    #[test]
    fn apply_replaces_only_the_named_section() -> TestResult {
        let mut details = ModelDetails {
            warranty: vec![Point::new("1 year")],
            ..ModelDetails::default()
        };

        details.apply(&DetailsUpdate::pairs(
            DetailSection::ProductFeatures,
            vec![KeyValue::new("Display", "OLED")],
        )?);

        assert_eq!(details.product_features, vec![KeyValue::new("Display", "OLED")]);
        assert_eq!(details.warranty, vec![Point::new("1 year")]);

        Ok(())
    }

    #[test]
    fn key_value_is_blank_only_when_both_sides_are() {
        assert!(KeyValue::new(" ", "").is_blank());
        assert!(!KeyValue::new("", "4 kg").is_blank());
    }

    #[test]
    fn missing_fields_decode_to_defaults() -> TestResult {
        let details: ModelDetails = serde_json::from_str(r#"{ "warranty": [{}] }"#)?;

        assert_eq!(details.warranty, vec![Point::default()]);
        assert!(details.specifications.is_empty());

        Ok(())
    }
}
