//! Section Forms
//!
//! Every editable attribute group is a `SectionForm`: plain form state that
//! turns itself into a validated request payload, or explains which field is
//! wrong. Submission, pending state and notifications live with the editor
//! that drives a form.

use crate::validation::ValidationError;

pub mod accessory;
pub mod color;
pub mod details;
pub mod model;
pub mod price;
pub mod product;

pub use accessory::AccessoryForm;
pub use color::{ColorDetailsForm, ColorForm, ImagesForm};
pub use details::{DetailsForm, RowsForm};
pub use model::{ModelForm, SchemeForm, StatusForm};
pub use price::PriceField;
pub use product::ProductForm;

/// Form state bound to one attribute group of one entity.
pub trait SectionForm {
    /// Validated request body.
    type Payload;

    /// Human-readable section name for notifications and logs.
    fn section(&self) -> &'static str;

    /// Check mandatory fields and build the payload.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    fn validate(&self) -> Result<Self::Payload, ValidationError>;
}
