//! Catalog API
//!
//! Typed client for the store backend. `CatalogApi` is the seam every editor,
//! wizard and list view talks to; `HttpCatalogApi` is the reqwest-backed
//! implementation.

use async_trait::async_trait;
use mockall::automock;

use medstore::{
    catalog::{
        Accessory, AccessoryId, ColorDetailsUpdate, ColorId, DetailsUpdate, ImageChanges, ModelId,
        NewAccessory, NewColor, NewModel, NewProduct, Product, ProductId, SchemeUpdate,
        StatusFilter, StatusUpdate,
    },
    enquiries::Enquiry,
};

mod envelope;
mod errors;
mod http;
mod multipart;

pub use errors::ApiError;
pub use http::HttpCatalogApi;

/// Remote catalogue operations, one method per endpoint.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Products in the given publication state.
    async fn list_products(&self, filter: StatusFilter) -> Result<Vec<Product>, ApiError>;

    /// A single product with its models.
    async fn get_product(&self, product: &ProductId) -> Result<Product, ApiError>;

    /// Create a product and return its id.
    async fn create_product(&self, product: &NewProduct) -> Result<ProductId, ApiError>;

    /// Replace a product's basic info.
    async fn update_product(
        &self,
        product: &ProductId,
        update: &NewProduct,
    ) -> Result<(), ApiError>;

    /// Create a model under a product and return its id.
    async fn create_model(
        &self,
        product: &ProductId,
        model: &NewModel,
    ) -> Result<ModelId, ApiError>;

    /// Replace a model's name and status.
    async fn update_model(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: &NewModel,
    ) -> Result<(), ApiError>;

    /// Replace one array section of a model.
    async fn update_model_details(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: &DetailsUpdate,
    ) -> Result<(), ApiError>;

    /// Change a model's publication state.
    async fn update_model_status(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: StatusUpdate,
    ) -> Result<(), ApiError>;

    /// Toggle one scheme flag of a model.
    async fn update_model_scheme(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: SchemeUpdate,
    ) -> Result<(), ApiError>;

    /// Delete a model and its colors.
    async fn delete_model(&self, product: &ProductId, model: &ModelId) -> Result<(), ApiError>;

    /// Create a color with its first images and return its id.
    async fn create_color(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &NewColor,
    ) -> Result<ColorId, ApiError>;

    /// Replace a color's name, stock and prices.
    async fn update_color_details(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &ColorId,
        update: &ColorDetailsUpdate,
    ) -> Result<(), ApiError>;

    /// Upload, replace or delete a color's images.
    async fn update_color_images(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &ColorId,
        changes: &ImageChanges,
    ) -> Result<(), ApiError>;

    /// Accessories in the given publication state.
    async fn list_accessories(&self, filter: StatusFilter) -> Result<Vec<Accessory>, ApiError>;

    /// Create an accessory and return its id.
    async fn create_accessory(&self, accessory: &NewAccessory) -> Result<AccessoryId, ApiError>;

    /// Replace an accessory's basic info.
    async fn update_accessory(
        &self,
        accessory: &AccessoryId,
        update: &NewAccessory,
    ) -> Result<(), ApiError>;

    /// Replace one array section of an accessory.
    async fn update_accessory_details(
        &self,
        accessory: &AccessoryId,
        update: &DetailsUpdate,
    ) -> Result<(), ApiError>;

    /// Upload, replace or delete an accessory's images.
    async fn update_accessory_images(
        &self,
        accessory: &AccessoryId,
        changes: &ImageChanges,
    ) -> Result<(), ApiError>;

    /// Send a storefront enquiry.
    async fn submit_enquiry(&self, enquiry: &Enquiry) -> Result<(), ApiError>;
}
