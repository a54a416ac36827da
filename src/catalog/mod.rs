//! Catalog
//!
//! Canonical DTOs for every entity level the backend exposes. Payloads are
//! decoded into these types at the client boundary so nothing downstream has to
//! probe for optional or renamed fields.

pub mod accessories;
pub mod colors;
pub mod details;
pub mod images;
pub mod models;
pub mod products;
pub mod schemes;
pub mod status;

pub use accessories::{Accessory, AccessoryId, NewAccessory};
pub use colors::{ColorDetailsUpdate, ColorId, ColorPrice, ColorVariant, NewColor, PriceInput};
pub use details::{DetailSection, DetailsUpdate, KeyValue, ModelDetails, Point, SectionData};
pub use images::{Image, ImageChanges, ImageUpload};
pub use models::{Model, ModelId, NewModel, StatusUpdate};
pub use products::{NewProduct, Product, ProductId};
pub use schemes::{Scheme, SchemeFlags, SchemeUpdate};
pub use status::{ListingStatus, StatusFilter};
