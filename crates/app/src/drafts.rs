//! Drafts
//!
//! YAML files describing an entity to build through a wizard. Image paths are
//! resolved against the directory the draft lives in.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use medstore::{
    catalog::{DetailSection, ImageChanges, ImageUpload, KeyValue, ListingStatus, Point},
    forms::{AccessoryForm, ColorForm, DetailsForm, ImagesForm, ModelForm, PriceField, ProductForm},
    money::DEFAULT_CURRENCY,
    sections::RowsEditor,
};

use crate::wizards::{AccessoryStages, ColorStages, ModelStages, ProductStages};

/// Draft loading errors.
#[derive(Debug, Error)]
pub enum DraftError {
    /// A draft or image file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,

        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The draft is not valid YAML for its kind.
    #[error("failed to parse draft: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Price not in `AMOUNT [CURRENCY]` form.
    #[error("invalid price {0:?}, expected 'AMOUNT CURRENCY'")]
    InvalidPrice(String),

    /// Amount that is not a decimal number.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Read and parse a draft file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, DraftError> {
    let contents = fs::read_to_string(path).map_err(|source| DraftError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(serde_norway::from_str(&contents)?)
}

/// Directory image paths in a draft are relative to.
pub fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// A new product with its first model and color.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductDraft {
    /// Basic product information.
    pub product: ProductSection,

    /// First model.
    pub model: ModelSection,

    /// First color of the model.
    pub color: ColorSection,

    /// Model details.
    #[serde(default)]
    pub details: DetailsSection,
}

impl ProductDraft {
    /// Build wizard forms, loading images relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable image or malformed amount.
    pub fn into_stages(self, base: &Path) -> Result<ProductStages, DraftError> {
        let mut details = DetailsForm::empty_model();

        self.details.apply(&mut details);

        Ok(ProductStages {
            product: self.product.into_form()?,
            model: self.model.into_form(),
            color: self.color.into_form(base)?,
            details,
        })
    }
}

/// A new model under an existing product.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDraft {
    /// The model.
    pub model: ModelSection,

    /// Its first color.
    pub color: ColorSection,

    /// Model details.
    #[serde(default)]
    pub details: DetailsSection,
}

impl ModelDraft {
    /// Build wizard forms, loading images relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable image or malformed amount.
    pub fn into_stages(self, base: &Path) -> Result<ModelStages, DraftError> {
        let mut details = DetailsForm::empty_model();

        self.details.apply(&mut details);

        Ok(ModelStages {
            model: self.model.into_form(),
            color: self.color.into_form(base)?,
            details,
        })
    }
}

/// A new color under an existing model.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorDraft {
    /// The color; it needs its own prices here.
    pub color: ColorSection,
}

impl ColorDraft {
    /// Build the wizard form, loading images relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable image or malformed amount.
    pub fn into_stages(self, base: &Path) -> Result<ColorStages, DraftError> {
        Ok(ColorStages {
            color: self.color.into_form(base)?,
        })
    }
}

/// A new accessory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessoryDraft {
    /// Basic information.
    pub accessory: AccessorySection,

    /// Images to upload; the images stage fails without at least one.
    #[serde(default)]
    pub images: ImagesSection,

    /// Specifications and warranty. Product features do not apply.
    #[serde(default)]
    pub details: DetailsSection,
}

impl AccessoryDraft {
    /// Build wizard forms, loading images relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable image or malformed amount.
    pub fn into_stages(self, base: &Path) -> Result<AccessoryStages, DraftError> {
        let mut details = DetailsForm::empty_accessory();

        self.details.apply(&mut details);

        Ok(AccessoryStages {
            basic: self.accessory.into_form()?,
            images: self.images.into_form(base)?,
            details,
        })
    }
}

/// Product fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSection {
    /// Title.
    pub title: String,

    /// Category label.
    #[serde(default)]
    pub category: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: String,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,

    /// Base price, e.g. `15000 INR`.
    #[serde(default)]
    pub price: Option<String>,

    /// Discount in the same currency.
    #[serde(default)]
    pub discount: Option<String>,
}

impl ProductSection {
    fn into_form(self) -> Result<ProductForm, DraftError> {
        Ok(ProductForm {
            product_title: self.title,
            product_category: self.category.unwrap_or_default(),
            new_category: String::new(),
            description: self.description,
            status: self.status,
            price: price_field(self.price.as_deref(), self.discount.as_deref())?,
        })
    }
}

/// Model fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Model name.
    pub name: String,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,
}

impl ModelSection {
    fn into_form(self) -> ModelForm {
        ModelForm {
            model_name: self.name,
            status: self.status,
        }
    }
}

/// One price entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceSection {
    /// Price, e.g. `15000 INR`.
    pub price: String,

    /// Discount in the same currency.
    #[serde(default)]
    pub discount: Option<String>,
}

/// Color fields and images.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorSection {
    /// Color name.
    pub name: String,

    /// Units on hand.
    #[serde(default)]
    pub stock: u32,

    /// Prices; when omitted the product's base price is used.
    #[serde(default)]
    pub prices: Vec<PriceSection>,

    /// Thumbnail image file.
    #[serde(default)]
    pub main_image: Option<PathBuf>,

    /// Product image files.
    #[serde(default)]
    pub product_images: Vec<PathBuf>,

    /// Gallery image files.
    #[serde(default)]
    pub gallery_images: Vec<PathBuf>,
}

impl ColorSection {
    fn into_form(self, base: &Path) -> Result<ColorForm, DraftError> {
        let prices = self
            .prices
            .iter()
            .map(|entry| price_field(Some(&entry.price), entry.discount.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ColorForm {
            color_name: self.name,
            stock: self.stock,
            prices,
            main_image: self
                .main_image
                .map(|path| load_image(base, &path))
                .transpose()?,
            product_images: load_images(base, &self.product_images)?,
            gallery_images: load_images(base, &self.gallery_images)?,
            uploaded_main_image: None,
        })
    }
}

/// Accessory fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessorySection {
    /// Title.
    pub title: String,

    /// Category label.
    #[serde(default)]
    pub category: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: String,

    /// Publication state.
    #[serde(default)]
    pub status: ListingStatus,

    /// Price amount.
    #[serde(default)]
    pub price: Option<String>,

    /// Discount amount.
    #[serde(default)]
    pub discount: Option<String>,

    /// Units on hand.
    #[serde(default)]
    pub stock: u32,
}

impl AccessorySection {
    fn into_form(self) -> Result<AccessoryForm, DraftError> {
        Ok(AccessoryForm {
            product_title: self.title,
            product_category: self.category.unwrap_or_default(),
            new_category: String::new(),
            description: self.description,
            price: self.price.as_deref().map(parse_amount).transpose()?,
            discount: self.discount.as_deref().map(parse_amount).transpose()?,
            stock: self.stock,
            status: self.status,
        })
    }
}

/// Image files for an images stage.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesSection {
    /// Product image files.
    #[serde(default)]
    pub product_images: Vec<PathBuf>,

    /// Gallery image files.
    #[serde(default)]
    pub gallery_images: Vec<PathBuf>,
}

impl ImagesSection {
    fn into_form(self, base: &Path) -> Result<ImagesForm, DraftError> {
        Ok(ImagesForm {
            changes: ImageChanges {
                product_images: load_images(base, &self.product_images)?,
                gallery_images: load_images(base, &self.gallery_images)?,
                ..ImageChanges::default()
            },
            ..ImagesForm::default()
        })
    }
}

/// Array sections. Sections the entity does not have are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailsSection {
    /// Specification bullets.
    #[serde(default)]
    pub specifications: Vec<String>,

    /// Warranty bullets.
    #[serde(default)]
    pub warranty: Vec<String>,

    /// Labelled features.
    #[serde(default)]
    pub product_features: Vec<KeyValue>,

    /// Labelled technical specifications.
    #[serde(default)]
    pub product_specifications: Vec<KeyValue>,
}

impl DetailsSection {
    fn apply(self, form: &mut DetailsForm) {
        for (section, rows) in [
            (DetailSection::Specifications, self.specifications),
            (DetailSection::Warranty, self.warranty),
        ] {
            if let Some(editor) = form.points_mut(section) {
                *editor = RowsEditor::new(rows.into_iter().map(Point::new).collect());
            }
        }

        for (section, rows) in [
            (DetailSection::ProductFeatures, self.product_features),
            (DetailSection::ProductSpecifications, self.product_specifications),
        ] {
            if let Some(editor) = form.pairs_mut(section) {
                *editor = RowsEditor::new(rows);
            }
        }
    }
}

fn parse_amount(amount: &str) -> Result<Decimal, DraftError> {
    Decimal::from_str(amount.trim()).map_err(|_err| DraftError::InvalidAmount(amount.to_string()))
}

/// `AMOUNT` or `AMOUNT CURRENCY`; a bare amount is in the default currency.
fn price_field(price: Option<&str>, discount: Option<&str>) -> Result<PriceField, DraftError> {
    let discount = discount.map(parse_amount).transpose()?;

    let Some(price) = price else {
        return Ok(PriceField {
            discount,
            ..PriceField::default()
        });
    };

    let parts: Vec<&str> = price.split_whitespace().collect();

    let (amount, currency) = match parts.as_slice() {
        [amount] => (*amount, DEFAULT_CURRENCY),
        [amount, currency] => (*amount, *currency),
        _ => return Err(DraftError::InvalidPrice(price.to_string())),
    };

    Ok(PriceField {
        currency: currency.to_string(),
        price: Some(parse_amount(amount)?),
        discount,
    })
}

fn load_image(base: &Path, path: &Path) -> Result<ImageUpload, DraftError> {
    let full = base.join(path);

    let bytes = fs::read(&full).map_err(|source| DraftError::Io {
        path: full.clone(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());

    Ok(ImageUpload::new(file_name, bytes))
}

fn load_images(base: &Path, paths: &[PathBuf]) -> Result<Vec<ImageUpload>, DraftError> {
    paths.iter().map(|path| load_image(base, path)).collect()
}
