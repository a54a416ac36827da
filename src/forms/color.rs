//! Color Forms

use rustc_hash::FxHashSet;

use crate::{
    catalog::{
        ColorDetailsUpdate, ColorVariant, ImageChanges, ImageUpload, NewColor, PriceInput,
    },
    forms::{SectionForm, price::PriceField},
    validation::{ValidationError, require_text},
};

fn validate_prices(prices: &[PriceField]) -> Result<Vec<PriceInput>, ValidationError> {
    if prices.is_empty() {
        return Err(ValidationError::Required("colorPrice"));
    }

    let mut seen = FxHashSet::default();
    let mut inputs = Vec::with_capacity(prices.len());

    for price in prices {
        let input = price.validate()?;

        if !seen.insert(input.currency.clone()) {
            return Err(ValidationError::invalid(
                "colorPrice",
                format!("{} is listed twice", input.currency),
            ));
        }

        inputs.push(input);
    }

    Ok(inputs)
}

/// A new color: name, stock, pricing and its first images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorForm {
    /// Display name.
    pub color_name: String,

    /// Units on hand.
    pub stock: u32,

    /// One entry per currency.
    pub prices: Vec<PriceField>,

    /// Thumbnail; mandatory for a new color.
    pub main_image: Option<ImageUpload>,

    /// Product shots.
    pub product_images: Vec<ImageUpload>,

    /// Gallery shots.
    pub gallery_images: Vec<ImageUpload>,

    /// Thumbnail already stored on the server.
    pub uploaded_main_image: Option<ImageUpload>,
}

impl ColorForm {
    /// Start a color priced like its product.
    #[must_use]
    pub fn with_price(price: PriceField) -> Self {
        Self {
            prices: vec![price],
            ..Self::default()
        }
    }

    /// Record that the files of the last save are stored, so saving again only
    /// sends what changed since.
    pub fn mark_uploaded(&mut self) {
        self.uploaded_main_image.clone_from(&self.main_image);
        self.product_images.clear();
        self.gallery_images.clear();
    }
}

impl SectionForm for ColorForm {
    type Payload = NewColor;

    fn section(&self) -> &'static str {
        "color"
    }

    fn validate(&self) -> Result<NewColor, ValidationError> {
        let color_name = require_text("colorName", &self.color_name)?;
        let color_price = validate_prices(&self.prices)?;

        let main_image = self
            .main_image
            .clone()
            .filter(|image| !image.is_empty())
            .ok_or(ValidationError::Required("colorImage"))?;

        Ok(NewColor {
            details: ColorDetailsUpdate {
                color_name,
                stock: self.stock,
                color_price,
            },
            images: ImageChanges {
                main_image: (self.uploaded_main_image.as_ref() != Some(&main_image))
                    .then_some(main_image),
                product_images: self.product_images.clone(),
                gallery_images: self.gallery_images.clone(),
                ..ImageChanges::default()
            },
        })
    }
}

/// The `details` section of an existing color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorDetailsForm {
    /// Display name.
    pub color_name: String,

    /// Units on hand.
    pub stock: u32,

    /// One entry per currency.
    pub prices: Vec<PriceField>,
}

impl ColorDetailsForm {
    /// Prefill from the stored color.
    #[must_use]
    pub fn from_color(color: &ColorVariant) -> Self {
        Self {
            color_name: color.color_name.clone(),
            stock: color.stock,
            prices: color.color_price.iter().map(PriceField::from).collect(),
        }
    }
}

impl SectionForm for ColorDetailsForm {
    type Payload = ColorDetailsUpdate;

    fn section(&self) -> &'static str {
        "color details"
    }

    fn validate(&self) -> Result<ColorDetailsUpdate, ValidationError> {
        Ok(ColorDetailsUpdate {
            color_name: require_text("colorName", &self.color_name)?,
            stock: self.stock,
            color_price: validate_prices(&self.prices)?,
        })
    }
}

/// The `images` section of an existing color or accessory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagesForm {
    /// Requested edits.
    pub changes: ImageChanges,

    /// Product images currently stored, for index checks.
    pub product_image_count: usize,

    /// Gallery images currently stored, for index checks.
    pub gallery_image_count: usize,
}

impl ImagesForm {
    /// Start an edit against the stored image counts.
    #[must_use]
    pub fn new(product_image_count: usize, gallery_image_count: usize) -> Self {
        Self {
            changes: ImageChanges::default(),
            product_image_count,
            gallery_image_count,
        }
    }
}

fn check_indexes(
    field: &'static str,
    indexes: &[usize],
    len: usize,
) -> Result<(), ValidationError> {
    let mut seen = FxHashSet::default();

    for index in indexes {
        if *index >= len {
            return Err(ValidationError::invalid(
                field,
                format!("no image at position {index}"),
            ));
        }

        if !seen.insert(*index) {
            return Err(ValidationError::invalid(
                field,
                format!("position {index} listed twice"),
            ));
        }
    }

    Ok(())
}

impl SectionForm for ImagesForm {
    type Payload = ImageChanges;

    fn section(&self) -> &'static str {
        "images"
    }

    fn validate(&self) -> Result<ImageChanges, ValidationError> {
        let changes = &self.changes;

        if changes.is_empty() {
            return Err(ValidationError::Required("images"));
        }

        if changes.main_image.as_ref().is_some_and(ImageUpload::is_empty) {
            return Err(ValidationError::invalid("mainImage", "file is empty"));
        }

        if let Some(index) = changes.index {
            if index >= self.product_image_count {
                return Err(ValidationError::invalid(
                    "index",
                    format!("no image at position {index}"),
                ));
            }

            if changes.product_images.len() != 1 {
                return Err(ValidationError::invalid(
                    "productImages",
                    "replacing by position takes exactly one file",
                ));
            }
        }

        check_indexes(
            "deleteProductIndexes",
            &changes.delete_product_indexes,
            self.product_image_count,
        )?;
        check_indexes(
            "deleteGalleryIndexes",
            &changes.delete_gallery_indexes,
            self.gallery_image_count,
        )?;

        Ok(changes.clone())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn blue() -> ColorForm {
        ColorForm {
            color_name: "Blue".to_string(),
            stock: 3,
            ..ColorForm::with_price(PriceField::new(Decimal::from(15000)))
        }
    }

    #[test]
    fn new_color_requires_main_image() {
        assert_eq!(blue().validate(), Err(ValidationError::Required("colorImage")));
    }

    #[test]
    fn empty_main_image_counts_as_missing() {
        let form = ColorForm {
            main_image: Some(ImageUpload::new("blue.png", Vec::new())),
            ..blue()
        };

        assert_eq!(form.validate(), Err(ValidationError::Required("colorImage")));
    }

    #[test]
    fn valid_color_carries_main_image() -> TestResult {
        let form = ColorForm {
            main_image: Some(ImageUpload::new("blue.png", vec![0x89, 0x50])),
            ..blue()
        };

        let color = form.validate()?;

        assert_eq!(color.details.color_name, "Blue");
        assert_eq!(color.images.upload_count(), 1);

        Ok(())
    }

    #[test]
    fn uploaded_files_are_not_sent_again() -> TestResult {
        let mut form = ColorForm {
            main_image: Some(ImageUpload::new("blue.png", vec![0x89, 0x50])),
            product_images: vec![ImageUpload::new("side.png", vec![1])],
            gallery_images: vec![ImageUpload::new("room.png", vec![2])],
            ..blue()
        };

        assert_eq!(form.validate()?.images.upload_count(), 3);

        form.mark_uploaded();

        let color = form.validate()?;

        assert!(color.images.is_empty(), "stored files were sent again");

        form.main_image = Some(ImageUpload::new("navy.png", vec![0x89]));

        assert_eq!(form.validate()?.images.upload_count(), 1);

        Ok(())
    }

    #[test]
    fn duplicate_currencies_are_rejected() {
        let form = ColorDetailsForm {
            color_name: "Blue".to_string(),
            stock: 1,
            prices: vec![PriceField::new(Decimal::ONE), PriceField::new(Decimal::TWO)],
        };

        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "colorPrice", .. })
        ));
    }

    #[test]
    fn images_form_rejects_empty_request() {
        assert_eq!(
            ImagesForm::new(2, 2).validate(),
            Err(ValidationError::Required("images"))
        );
    }

    #[test]
    fn images_form_checks_delete_positions() {
        let mut form = ImagesForm::new(2, 0);

        form.changes.delete_product_indexes = smallvec![1, 2];

        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "deleteProductIndexes", .. })
        ));
    }

    #[test]
    fn replace_by_index_takes_one_file() -> TestResult {
        let mut form = ImagesForm::new(3, 0);

        form.changes.index = Some(1);
        form.changes.product_images = vec![ImageUpload::new("side.png", vec![1])];

        assert_eq!(form.validate()?.index, Some(1));

        form.changes.product_images.push(ImageUpload::new("back.png", vec![1]));

        assert!(form.validate().is_err());

        Ok(())
    }
}
