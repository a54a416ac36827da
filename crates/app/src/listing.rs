//! List Views
//!
//! A list view holds one fetched collection. Changing the status filter goes
//! back to the server; typing a search query only filters what is already
//! loaded.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use thiserror::Error;

use medstore::{
    catalog::{Accessory, ModelId, Product, ProductId, StatusFilter},
    categories::{Categorized, available_categories},
    search::{Searchable, search},
    wizard::{Advance, WizardIds},
};

use crate::{
    api::{ApiError, CatalogApi},
    editor::SectionEditor,
    notify::{Confirm, Notifier},
    submit::Submit,
    wizards::{ColorStages, ColorWizard, ModelStages, ModelWizard},
};

/// Errors raised by list views.
#[derive(Debug, Error)]
pub enum ListError {
    /// Fetching or mutating the collection failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A collection a list view can fetch by status.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Row type.
    type Item: Searchable + Categorized + Clone + Send + Sync;

    /// Collection name for logs and messages.
    const NAME: &'static str;

    /// Fetch the rows in `filter`'s state.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    async fn fetch(api: &dyn CatalogApi, filter: StatusFilter)
    -> Result<Vec<Self::Item>, ApiError>;

    /// Stable key used to merge pending and live rows.
    fn key(item: &Self::Item) -> &str;
}

/// Products, with their embedded models.
#[derive(Debug, Clone, Copy, Default)]
pub struct Products;

#[async_trait]
impl ListSource for Products {
    type Item = Product;

    const NAME: &'static str = "products";

    async fn fetch(api: &dyn CatalogApi, filter: StatusFilter) -> Result<Vec<Product>, ApiError> {
        api.list_products(filter).await
    }

    fn key(item: &Product) -> &str {
        item.id.as_str()
    }
}

/// Accessories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accessories;

#[async_trait]
impl ListSource for Accessories {
    type Item = Accessory;

    const NAME: &'static str = "accessories";

    async fn fetch(
        api: &dyn CatalogApi,
        filter: StatusFilter,
    ) -> Result<Vec<Accessory>, ApiError> {
        api.list_accessories(filter).await
    }

    fn key(item: &Accessory) -> &str {
        item.id.as_str()
    }
}

/// Pending and live rows fetched side by side, merged by key.
async fn fetch_merged<S: ListSource>(api: &dyn CatalogApi) -> Result<Vec<S::Item>, ApiError> {
    let (pending, live) = tokio::try_join!(
        S::fetch(api, StatusFilter::Pending),
        S::fetch(api, StatusFilter::Live)
    )?;

    let mut seen = FxHashSet::default();
    let mut merged = Vec::with_capacity(pending.len() + live.len());

    for item in pending.into_iter().chain(live) {
        if seen.insert(S::key(&item).to_string()) {
            merged.push(item);
        }
    }

    Ok(merged)
}

/// Headless table state for one collection.
pub struct ListView<S: ListSource> {
    status: StatusFilter,
    query: String,
    items: Vec<S::Item>,
    merge_all: bool,
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
}

impl<S: ListSource> std::fmt::Debug for ListView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("source", &S::NAME)
            .field("status", &self.status)
            .field("query", &self.query)
            .field("items", &self.items.len())
            .field("merge_all", &self.merge_all)
            .finish_non_exhaustive()
    }
}

impl<S: ListSource> ListView<S> {
    /// An empty view showing every status; call `refresh` to load it.
    pub fn new(
        api: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            status: StatusFilter::All,
            query: String::new(),
            items: Vec::new(),
            merge_all: false,
            api,
            notifier,
            confirm,
        }
    }

    /// Start on `status` instead of every status.
    #[must_use]
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Build the "all" view from the pending and live endpoints instead of the
    /// combined one.
    #[must_use]
    pub fn merging_all(mut self) -> Self {
        self.merge_all = true;
        self
    }

    /// Active status filter.
    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Active search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Every fetched row, before search.
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    /// Rows matching the search query.
    pub fn visible(&self) -> Vec<&S::Item> {
        search(&self.items, &self.query)
    }

    /// Category picker options drawn from the fetched rows.
    pub fn categories<E: AsRef<str>>(&self, excluded: &[E]) -> Vec<String> {
        available_categories(&self.items, excluded)
    }

    /// Fetch the rows for the active status. On failure the old rows stay.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying it.
    #[tracing::instrument(
        name = "list.refresh",
        skip(self),
        fields(source = S::NAME, status = %self.status, count = tracing::field::Empty),
        err
    )]
    pub async fn refresh(&mut self) -> Result<(), ListError> {
        let fetched = if self.merge_all && self.status == StatusFilter::All {
            fetch_merged::<S>(self.api.as_ref()).await
        } else {
            S::fetch(self.api.as_ref(), self.status).await
        };

        match fetched {
            Ok(items) => {
                tracing::Span::current().record("count", items.len());
                self.items = items;

                Ok(())
            }
            Err(error) => {
                self.notifier.failure(error.user_message());

                Err(error.into())
            }
        }
    }

    /// Switch status and re-fetch.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous filter and its rows stay.
    pub async fn set_status(&mut self, status: StatusFilter) -> Result<(), ListError> {
        let previous = std::mem::replace(&mut self.status, status);

        if let Err(error) = self.refresh().await {
            self.status = previous;

            return Err(error);
        }

        Ok(())
    }

    /// Change the search query. Never fetches.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Editor for a single section of a row.
    pub fn edit_section<F: Submit>(&self, form: F, target: WizardIds) -> SectionEditor<F> {
        SectionEditor::new(
            form,
            target,
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
        )
    }

    /// Refresh after a wizard opened from this view finished.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure.
    pub async fn wizard_advanced(&mut self, advance: &Advance) -> Result<(), ListError> {
        match advance {
            Advance::Finished(_) => self.refresh().await,
            Advance::Next(_) => Ok(()),
        }
    }
}

impl ListView<Products> {
    /// Full record behind a row.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying it.
    pub async fn detail(&self, product: &ProductId) -> Result<Product, ListError> {
        match self.api.get_product(product).await {
            Ok(product) => Ok(product),
            Err(error) => {
                self.notifier.failure(error.user_message());

                Err(error.into())
            }
        }
    }

    /// "Add new model" wizard under a product row.
    pub fn add_model(&self, product: &ProductId) -> ModelWizard {
        ModelWizard::scoped(
            WizardIds::for_product(product.clone()),
            ModelStages::default(),
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
        )
    }

    /// "Add color" wizard under a model.
    pub fn add_color(&self, product: &ProductId, model: &ModelId) -> ColorWizard {
        ColorWizard::scoped(
            WizardIds::for_model(product.clone(), model.clone()),
            ColorStages::default(),
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
        )
    }

    /// Delete a model after confirmation, then reload the list.
    ///
    /// Returns `Ok(false)` when the user declined. On failure the list is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns the delete or refresh failure.
    #[tracing::instrument(
        name = "list.delete_model",
        skip(self),
        fields(product_id = %product, model_id = %model),
        err
    )]
    pub async fn delete_model(
        &mut self,
        product: &ProductId,
        model: &ModelId,
    ) -> Result<bool, ListError> {
        let name = self
            .items
            .iter()
            .find(|row| &row.id == product)
            .and_then(|row| row.model(model))
            .map_or_else(|| model.to_string(), |found| found.model_name.clone());

        if !self.confirm.confirm(&format!("Delete model {name}?")) {
            tracing::debug!("model delete declined");

            return Ok(false);
        }

        if let Err(error) = self.api.delete_model(product, model).await {
            self.notifier.failure(error.user_message());

            return Err(error.into());
        }

        self.notifier.success(&format!("Deleted model {name}"));
        self.refresh().await?;

        Ok(true)
    }
}
