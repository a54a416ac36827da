//! Medstore prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Accessory, AccessoryId, ColorDetailsUpdate, ColorId, ColorPrice, ColorVariant,
        DetailSection, DetailsUpdate, Image, ImageChanges, ImageUpload, KeyValue, ListingStatus,
        Model, ModelDetails, ModelId, NewAccessory, NewColor, NewModel, NewProduct, Point,
        PriceInput, Product, ProductId, Scheme, SchemeFlags, SchemeUpdate, StatusFilter,
        StatusUpdate,
    },
    categories::{Categorized, available_categories, resolve_category},
    enquiries::{Enquiry, EnquiryForm},
    forms::{
        AccessoryForm, ColorDetailsForm, ColorForm, DetailsForm, ImagesForm, ModelForm, PriceField,
        ProductForm, RowsForm, SchemeForm, SectionForm, StatusForm,
    },
    ids::TypedId,
    search::{Searchable, search},
    sections::{Row, RowError, RowsEditor},
    validation::ValidationError,
    wizard::{
        AccessoryFlow, Advance, ColorFlow, Flow, IdKind, ModelFlow, Produced, ProductFlow, Wizard,
        WizardError, WizardIds,
    },
};
