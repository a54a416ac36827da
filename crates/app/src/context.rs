//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiError, CatalogApi, HttpCatalogApi},
    config::Config,
    listing::{Accessories, ListView, Products},
    notify::{Confirm, LogNotifier, Notifier},
    storefront::Storefront,
    wizards::{AccessoryWizard, ProductWizard},
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built.
    #[error("failed to build API client")]
    Api(#[source] ApiError),
}

/// Shared collaborators for every screen.
#[derive(Clone)]
pub struct AppContext {
    /// Catalog backend.
    pub api: Arc<dyn CatalogApi>,

    /// Save and failure reporting.
    pub notifier: Arc<dyn Notifier>,

    /// Destructive-action prompt.
    pub confirm: Arc<dyn Confirm>,

    /// Categories hidden from pickers.
    pub excluded_categories: Vec<String>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("excluded_categories", &self.excluded_categories)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context from configuration, talking HTTP to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &Config, confirm: Arc<dyn Confirm>) -> Result<Self, AppInitError> {
        let api = HttpCatalogApi::new(
            &config.api.api_url,
            config.api.token(),
            config.api.timeout(),
        )
        .map_err(AppInitError::Api)?;

        Ok(Self::new(
            Arc::new(api),
            Arc::new(LogNotifier),
            confirm,
            config.catalog.excluded_categories.clone(),
        ))
    }

    /// Build the context from explicit collaborators.
    pub fn new(
        api: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        excluded_categories: Vec<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            confirm,
            excluded_categories,
        }
    }

    /// Admin product list.
    pub fn products(&self) -> ListView<Products> {
        ListView::new(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            Arc::clone(&self.confirm),
        )
    }

    /// Admin accessory list.
    pub fn accessories(&self) -> ListView<Accessories> {
        ListView::new(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            Arc::clone(&self.confirm),
        )
    }

    /// Fresh product wizard.
    pub fn product_wizard(&self) -> ProductWizard {
        ProductWizard::new(Arc::clone(&self.api), Arc::clone(&self.notifier))
    }

    /// Fresh accessory wizard.
    pub fn accessory_wizard(&self) -> AccessoryWizard {
        AccessoryWizard::new(Arc::clone(&self.api), Arc::clone(&self.notifier))
    }

    /// Public storefront.
    pub fn storefront(&self) -> Storefront {
        Storefront::new(Arc::clone(&self.api), Arc::clone(&self.notifier))
    }
}
