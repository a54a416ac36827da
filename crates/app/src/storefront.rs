//! Storefront
//!
//! Read-only browsing of live listings and enquiry submission.

use std::sync::Arc;

use medstore::{
    catalog::{Accessory, Product, ProductId, StatusFilter},
    enquiries::EnquiryForm,
    wizard::WizardIds,
};

use crate::{
    api::{ApiError, CatalogApi},
    editor::SectionEditor,
    listing::{Accessories, ListError, ListSource, ListView, Products},
    notify::{FixedAnswer, Notifier},
};

/// Public storefront backed by the catalog API.
#[derive(Clone)]
pub struct Storefront {
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront").finish_non_exhaustive()
    }
}

impl Storefront {
    /// Storefront over `api`.
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn view<S: ListSource>(&self) -> ListView<S> {
        ListView::new(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            Arc::new(FixedAnswer(false)),
        )
        .with_status(StatusFilter::Live)
    }

    /// Live products, loaded.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn products(&self) -> Result<ListView<Products>, ListError> {
        let mut view = self.view::<Products>();

        view.refresh().await?;

        Ok(view)
    }

    /// Live accessories, loaded.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn accessories(&self) -> Result<ListView<Accessories>, ListError> {
        let mut view = self.view::<Accessories>();

        view.refresh().await?;

        Ok(view)
    }

    /// Product page.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn product(&self, product: &ProductId) -> Result<Product, ApiError> {
        self.api.get_product(product).await
    }

    /// Enquiry form for a product page.
    pub fn enquire_about_product(&self, product: &Product) -> SectionEditor<EnquiryForm> {
        self.enquiry(EnquiryForm::for_product(product))
    }

    /// Enquiry form for an accessory page.
    pub fn enquire_about_accessory(&self, accessory: &Accessory) -> SectionEditor<EnquiryForm> {
        self.enquiry(EnquiryForm::for_accessory(accessory))
    }

    fn enquiry(&self, form: EnquiryForm) -> SectionEditor<EnquiryForm> {
        SectionEditor::new(
            form,
            WizardIds::default(),
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{api::MockCatalogApi, editor::EditorError, notify::MockNotifier};

    use super::*;

    fn monitor() -> TestResult<Product> {
        Ok(serde_json::from_value(json!({
            "_id": "p1",
            "productTitle": "Test Monitor",
            "models": [{
                "modelId": "m1",
                "modelName": "MX-12",
                "colors": [{
                    "colorId": "c1",
                    "colorName": "Slate",
                    "colorImage": "https://cdn.example.com/slate.png"
                }]
            }]
        }))?)
    }

    #[tokio::test]
    async fn storefront_lists_live_products_only() -> TestResult {
        let product = monitor()?;

        let mut api = MockCatalogApi::new();

        api.expect_list_products()
            .once()
            .withf(|filter| *filter == StatusFilter::Live)
            .returning(move |_| Ok(vec![product.clone()]));

        let mut notifier = MockNotifier::new();

        notifier.expect_success().never();
        notifier.expect_failure().never();

        let storefront = Storefront::new(Arc::new(api), Arc::new(notifier));
        let view = storefront.products().await?;

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.status(), StatusFilter::Live);

        Ok(())
    }

    #[tokio::test]
    async fn enquiry_carries_product_context() -> TestResult {
        let product = monitor()?;

        let mut api = MockCatalogApi::new();

        api.expect_submit_enquiry()
            .once()
            .withf(|enquiry| {
                enquiry.product_id.as_str() == "p1"
                    && enquiry.product_title == "Test Monitor"
                    && enquiry.product_image_url == "https://cdn.example.com/slate.png"
            })
            .returning(|_| Ok(()));

        let mut notifier = MockNotifier::new();

        notifier.expect_success().once().return_const(());
        notifier.expect_failure().never();

        let storefront = Storefront::new(Arc::new(api), Arc::new(notifier));
        let mut editor = storefront.enquire_about_product(&product);

        let form = editor.form_mut();
        form.name = "Asha Rao".to_string();
        form.email = "asha@example.com".to_string();
        form.phone = "+91 98765 43210".to_string();
        form.message = "Is the 15 inch model in stock?".to_string();

        editor.save().await?;

        Ok(())
    }

    #[tokio::test]
    async fn invalid_enquiry_is_not_sent() -> TestResult {
        let product = monitor()?;

        let mut api = MockCatalogApi::new();

        api.expect_submit_enquiry().never();

        let mut notifier = MockNotifier::new();

        notifier.expect_success().never();
        notifier.expect_failure().once().return_const(());

        let storefront = Storefront::new(Arc::new(api), Arc::new(notifier));
        let mut editor = storefront.enquire_about_product(&product);

        editor.form_mut().name = "Asha Rao".to_string();

        let result = editor.save().await;

        assert!(
            matches!(result, Err(EditorError::Validation(_))),
            "expected validation error, got {result:?}"
        );

        Ok(())
    }
}
