//! Array Section Forms

use crate::{
    catalog::{Accessory, DetailSection, DetailsUpdate, KeyValue, ModelDetails, Point},
    forms::SectionForm,
    sections::{Row, RowError, RowsEditor},
    validation::ValidationError,
};

/// Rows that can fill a detail section.
pub trait SectionRow: Row {
    /// Wrap prepared rows into the section update body.
    ///
    /// # Errors
    ///
    /// Returns `RowError::WrongShape` if `section` holds the other row type.
    fn into_update(section: DetailSection, rows: Vec<Self>) -> Result<DetailsUpdate, RowError>;
}

impl SectionRow for Point {
    fn into_update(section: DetailSection, rows: Vec<Self>) -> Result<DetailsUpdate, RowError> {
        DetailsUpdate::points(section, rows)
    }
}

impl SectionRow for KeyValue {
    fn into_update(section: DetailSection, rows: Vec<Self>) -> Result<DetailsUpdate, RowError> {
        DetailsUpdate::pairs(section, rows)
    }
}

/// Editor state for one array section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsForm<R> {
    /// Section being edited.
    pub section: DetailSection,

    /// Local rows.
    pub rows: RowsEditor<R>,
}

impl<R: SectionRow> RowsForm<R> {
    /// Start from the section's current rows.
    #[must_use]
    pub fn new(section: DetailSection, rows: Vec<R>) -> Self {
        Self {
            section,
            rows: RowsEditor::new(rows),
        }
    }
}

impl RowsForm<Point> {
    /// Bullet section of a stored model.
    #[must_use]
    pub fn from_model_points(details: &ModelDetails, section: DetailSection) -> Self {
        let rows = match section {
            DetailSection::Warranty => details.warranty.clone(),
            _ => details.specifications.clone(),
        };

        Self::new(section, rows)
    }

    /// Bullet section of a stored accessory.
    #[must_use]
    pub fn from_accessory_points(accessory: &Accessory, section: DetailSection) -> Self {
        let rows = match section {
            DetailSection::Warranty => accessory.warranty.clone(),
            _ => accessory.specifications.clone(),
        };

        Self::new(section, rows)
    }
}

impl RowsForm<KeyValue> {
    /// Labelled section of a stored model.
    #[must_use]
    pub fn from_model_pairs(details: &ModelDetails, section: DetailSection) -> Self {
        let rows = match section {
            DetailSection::ProductFeatures => details.product_features.clone(),
            _ => details.product_specifications.clone(),
        };

        Self::new(section, rows)
    }
}

impl<R: SectionRow> SectionForm for RowsForm<R> {
    type Payload = DetailsUpdate;

    fn section(&self) -> &'static str {
        self.section.as_str()
    }

    fn validate(&self) -> Result<DetailsUpdate, ValidationError> {
        R::into_update(self.section, self.rows.payload())
            .map_err(|error| ValidationError::invalid("section", error.to_string()))
    }
}

/// Every array section of one entity, saved together as a wizard stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsForm {
    /// Bullet sections.
    pub points: Vec<RowsForm<Point>>,

    /// Labelled sections.
    pub pairs: Vec<RowsForm<KeyValue>>,
}

impl DetailsForm {
    /// The four model sections, prefilled from stored details.
    #[must_use]
    pub fn for_model(details: &ModelDetails) -> Self {
        Self {
            points: vec![
                RowsForm::from_model_points(details, DetailSection::Specifications),
                RowsForm::from_model_points(details, DetailSection::Warranty),
            ],
            pairs: vec![
                RowsForm::from_model_pairs(details, DetailSection::ProductSpecifications),
                RowsForm::from_model_pairs(details, DetailSection::ProductFeatures),
            ],
        }
    }

    /// Blank model sections for a model that has no details yet.
    #[must_use]
    pub fn empty_model() -> Self {
        Self::for_model(&ModelDetails::default())
    }

    /// Blank accessory sections for a new accessory.
    #[must_use]
    pub fn empty_accessory() -> Self {
        Self {
            points: vec![
                RowsForm::new(DetailSection::Specifications, Vec::new()),
                RowsForm::new(DetailSection::Warranty, Vec::new()),
            ],
            pairs: vec![RowsForm::new(
                DetailSection::ProductSpecifications,
                Vec::new(),
            )],
        }
    }

    /// The three accessory sections, prefilled from the stored accessory.
    #[must_use]
    pub fn for_accessory(accessory: &Accessory) -> Self {
        Self {
            points: vec![
                RowsForm::from_accessory_points(accessory, DetailSection::Specifications),
                RowsForm::from_accessory_points(accessory, DetailSection::Warranty),
            ],
            pairs: vec![RowsForm::new(
                DetailSection::ProductSpecifications,
                accessory.product_specifications.clone(),
            )],
        }
    }

    /// Bullet section editor, if the form carries it.
    pub fn points_mut(&mut self, section: DetailSection) -> Option<&mut RowsEditor<Point>> {
        self.points
            .iter_mut()
            .find(|form| form.section == section)
            .map(|form| &mut form.rows)
    }

    /// Labelled section editor, if the form carries it.
    pub fn pairs_mut(&mut self, section: DetailSection) -> Option<&mut RowsEditor<KeyValue>> {
        self.pairs
            .iter_mut()
            .find(|form| form.section == section)
            .map(|form| &mut form.rows)
    }
}

impl SectionForm for DetailsForm {
    type Payload = Vec<DetailsUpdate>;

    fn section(&self) -> &'static str {
        "details"
    }

    fn validate(&self) -> Result<Vec<DetailsUpdate>, ValidationError> {
        let points = self.points.iter().map(SectionForm::validate);
        let pairs = self.pairs.iter().map(SectionForm::validate);

        points.chain(pairs).collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::SectionData;

    use super::*;

    #[test]
    fn save_sends_only_filled_rows() -> TestResult {
        let mut form = RowsForm::<Point>::new(DetailSection::Specifications, Vec::new());

        let first = form.rows.add_item();
        form.rows.edit_item(first, "points", "Lightweight")?;
        form.rows.add_item();

        let update = form.validate()?;

        assert_eq!(
            update.data,
            SectionData::Points(vec![Point::new("Lightweight")])
        );

        Ok(())
    }

    #[test]
    fn wrong_row_type_for_section_is_invalid() {
        let form = RowsForm::<KeyValue>::new(DetailSection::Warranty, Vec::new());

        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "section", .. })
        ));
    }

    #[test]
    fn details_form_sends_every_section() -> TestResult {
        let mut form = DetailsForm::for_model(&ModelDetails::default());

        let specifications = form
            .points_mut(DetailSection::Specifications)
            .ok_or("missing specifications")?;
        let row = specifications.add_item();
        specifications.edit_item(row, "points", "Lightweight")?;
        specifications.add_item();

        let updates = form.validate()?;

        assert_eq!(updates.len(), 4);
        assert_eq!(
            updates.first().map(|update| &update.data),
            Some(&SectionData::Points(vec![Point::new("Lightweight")]))
        );

        Ok(())
    }

    #[test]
    fn accessory_details_have_no_feature_section() -> TestResult {
        let accessory: Accessory = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "productTitle": "Surgical Gloves",
            "warranty": [{ "points": "6 months" }]
        }))?;

        let mut form = DetailsForm::for_accessory(&accessory);

        assert!(form.pairs_mut(DetailSection::ProductFeatures).is_none());
        assert_eq!(
            form.points_mut(DetailSection::Warranty).map(|rows| rows.rows().len()),
            Some(1)
        );

        Ok(())
    }

    #[test]
    fn prefill_picks_requested_section() {
        let details = ModelDetails {
            warranty: vec![Point::new("2 years")],
            specifications: vec![Point::new("Portable")],
            ..ModelDetails::default()
        };

        let form = RowsForm::from_model_points(&details, DetailSection::Warranty);

        assert_eq!(form.rows.rows(), &[Point::new("2 years")]);
    }
}
