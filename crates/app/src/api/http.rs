//! reqwest-backed catalog client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use uuid::Uuid;
use zeroize::Zeroizing;

use medstore::{
    catalog::{
        Accessory, AccessoryId, ColorDetailsUpdate, ColorId, DetailsUpdate, ImageChanges, ModelId,
        NewAccessory, NewColor, NewModel, NewProduct, Product, ProductId, SchemeUpdate,
        StatusFilter, StatusUpdate,
    },
    enquiries::Enquiry,
};

use super::{CatalogApi, envelope, errors::ApiError, multipart};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Serialize)]
struct SectionBody<'a, T> {
    section: &'a str,
    data: &'a T,
}

/// HTTP client for the store backend.
#[derive(Clone)]
pub struct HttpCatalogApi {
    base_url: Url,
    token: Option<Zeroizing<String>>,
    http: Client,
}

impl fmt::Debug for HttpCatalogApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogApi")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpCatalogApi {
    /// Create a client for `base_url`, e.g. `"http://localhost:8000/api"`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL that can carry a
    /// path, or if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<Zeroizing<String>>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|error| ApiError::BaseUrl(format!("{base_url}: {error}")))?;

        if parsed.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: parsed,
            token: token.filter(|token| !token.trim().is_empty()),
            http,
        })
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn model_url(
        &self,
        product: &ProductId,
        model: &ModelId,
        rest: &[&str],
    ) -> Result<Url, ApiError> {
        self.url(
            ["products", product.as_str(), "models", model.as_str()]
                .into_iter()
                .chain(rest.iter().copied()),
        )
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request_id = Uuid::now_v7().to_string();

        tracing::Span::current().record("request_id", tracing::field::display(&request_id));

        let request = request.header(REQUEST_ID_HEADER, request_id);

        match &self.token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = self.prepare(request).send().await?;

        read_body(response).await
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = envelope::error_message(&body);

        tracing::error!(
            status = status.as_u16(),
            server_message = message.as_deref(),
            "catalog request failed"
        );

        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body.to_vec())
}

fn status_segment(filter: StatusFilter) -> Option<&'static str> {
    match filter {
        StatusFilter::All => None,
        StatusFilter::Pending => Some("pending"),
        StatusFilter::Live => Some("live"),
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    #[tracing::instrument(
        name = "api.list_products",
        skip(self),
        fields(request_id = tracing::field::Empty, count = tracing::field::Empty),
        err
    )]
    async fn list_products(&self, filter: StatusFilter) -> Result<Vec<Product>, ApiError> {
        let url = self.url(std::iter::once("products").chain(status_segment(filter)))?;
        let body = self.send(self.http.get(url)).await?;
        let products: Vec<Product> = envelope::decode(&body)?;

        tracing::Span::current().record("count", products.len());

        Ok(products)
    }

    #[tracing::instrument(
        name = "api.get_product",
        skip(self),
        fields(request_id = tracing::field::Empty, product_id = %product),
        err
    )]
    async fn get_product(&self, product: &ProductId) -> Result<Product, ApiError> {
        let url = self.url(["products", product.as_str()])?;
        let body = self.send(self.http.get(url)).await?;

        envelope::decode(&body)
    }

    #[tracing::instrument(
        name = "api.create_product",
        skip(self, product),
        fields(request_id = tracing::field::Empty, product_id = tracing::field::Empty),
        err
    )]
    async fn create_product(&self, product: &NewProduct) -> Result<ProductId, ApiError> {
        let url = self.url(["products"])?;
        let body = self.send(self.http.post(url).json(product)).await?;
        let id: ProductId = envelope::decode_created(&body)?;

        tracing::Span::current().record("product_id", tracing::field::display(&id));
        tracing::info!(product_id = %id, title = %product.product_title, "created product");

        Ok(id)
    }

    #[tracing::instrument(
        name = "api.update_product",
        skip(self, update),
        fields(request_id = tracing::field::Empty, product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        product: &ProductId,
        update: &NewProduct,
    ) -> Result<(), ApiError> {
        let url = self.url(["products", product.as_str()])?;

        self.send_empty(self.http.patch(url).json(update)).await
    }

    #[tracing::instrument(
        name = "api.create_model",
        skip(self, model),
        fields(
            request_id = tracing::field::Empty,
            product_id = %product,
            model_id = tracing::field::Empty
        ),
        err
    )]
    async fn create_model(
        &self,
        product: &ProductId,
        model: &NewModel,
    ) -> Result<ModelId, ApiError> {
        let url = self.url(["products", product.as_str(), "models"])?;
        let body = self.send(self.http.post(url).json(model)).await?;
        let id: ModelId = envelope::decode_created(&body)?;

        tracing::Span::current().record("model_id", tracing::field::display(&id));
        tracing::info!(product_id = %product, model_id = %id, "created model");

        Ok(id)
    }

    #[tracing::instrument(
        name = "api.update_model",
        skip(self, update),
        fields(request_id = tracing::field::Empty, product_id = %product, model_id = %model),
        err
    )]
    async fn update_model(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: &NewModel,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &[])?;

        self.send_empty(self.http.patch(url).json(update)).await
    }

    #[tracing::instrument(
        name = "api.update_model_details",
        skip(self, update),
        fields(
            request_id = tracing::field::Empty,
            product_id = %product,
            model_id = %model,
            section = %update.section,
            rows = update.data.len()
        ),
        err
    )]
    async fn update_model_details(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: &DetailsUpdate,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &["details"])?;

        self.send_empty(self.http.patch(url).json(update)).await
    }

    #[tracing::instrument(
        name = "api.update_model_status",
        skip(self),
        fields(request_id = tracing::field::Empty, product_id = %product, model_id = %model),
        err
    )]
    async fn update_model_status(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: StatusUpdate,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &["status"])?;

        self.send_empty(self.http.patch(url).json(&update)).await
    }

    #[tracing::instrument(
        name = "api.update_model_scheme",
        skip(self),
        fields(request_id = tracing::field::Empty, product_id = %product, model_id = %model),
        err
    )]
    async fn update_model_scheme(
        &self,
        product: &ProductId,
        model: &ModelId,
        update: SchemeUpdate,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &["schemes"])?;

        self.send_empty(self.http.patch(url).json(&update)).await
    }

    #[tracing::instrument(
        name = "api.delete_model",
        skip(self),
        fields(request_id = tracing::field::Empty, product_id = %product, model_id = %model),
        err
    )]
    async fn delete_model(&self, product: &ProductId, model: &ModelId) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &[])?;

        self.send_empty(self.http.delete(url)).await?;

        tracing::info!(product_id = %product, model_id = %model, "deleted model");

        Ok(())
    }

    #[tracing::instrument(
        name = "api.create_color",
        skip(self, color),
        fields(
            request_id = tracing::field::Empty,
            product_id = %product,
            model_id = %model,
            color_id = tracing::field::Empty,
            uploads = color.images.upload_count()
        ),
        err
    )]
    async fn create_color(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &NewColor,
    ) -> Result<ColorId, ApiError> {
        let url = self.model_url(product, model, &["colors"])?;
        let form = multipart::new_color(color)?;
        let body = self.send(self.http.post(url).multipart(form)).await?;
        let id: ColorId = envelope::decode_created(&body)?;

        tracing::Span::current().record("color_id", tracing::field::display(&id));
        tracing::info!(model_id = %model, color_id = %id, "created color");

        Ok(id)
    }

    #[tracing::instrument(
        name = "api.update_color_details",
        skip(self, update),
        fields(
            request_id = tracing::field::Empty,
            product_id = %product,
            model_id = %model,
            color_id = %color
        ),
        err
    )]
    async fn update_color_details(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &ColorId,
        update: &ColorDetailsUpdate,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &["colors", color.as_str()])?;
        let body = SectionBody {
            section: "details",
            data: update,
        };

        self.send_empty(self.http.patch(url).json(&body)).await
    }

    #[tracing::instrument(
        name = "api.update_color_images",
        skip(self, changes),
        fields(
            request_id = tracing::field::Empty,
            product_id = %product,
            model_id = %model,
            color_id = %color,
            uploads = changes.upload_count()
        ),
        err
    )]
    async fn update_color_images(
        &self,
        product: &ProductId,
        model: &ModelId,
        color: &ColorId,
        changes: &ImageChanges,
    ) -> Result<(), ApiError> {
        let url = self.model_url(product, model, &["colors", color.as_str()])?;
        let form = multipart::image_changes(changes)?;

        self.send_empty(self.http.patch(url).multipart(form)).await
    }

    #[tracing::instrument(
        name = "api.list_accessories",
        skip(self),
        fields(request_id = tracing::field::Empty, count = tracing::field::Empty),
        err
    )]
    async fn list_accessories(&self, filter: StatusFilter) -> Result<Vec<Accessory>, ApiError> {
        let url = self.url(std::iter::once("accessories").chain(status_segment(filter)))?;
        let body = self.send(self.http.get(url)).await?;
        let accessories: Vec<Accessory> = envelope::decode(&body)?;

        tracing::Span::current().record("count", accessories.len());

        Ok(accessories)
    }

    #[tracing::instrument(
        name = "api.create_accessory",
        skip(self, accessory),
        fields(request_id = tracing::field::Empty, accessory_id = tracing::field::Empty),
        err
    )]
    async fn create_accessory(&self, accessory: &NewAccessory) -> Result<AccessoryId, ApiError> {
        let url = self.url(["accessories"])?;
        let body = self.send(self.http.post(url).json(accessory)).await?;
        let id: AccessoryId = envelope::decode_created(&body)?;

        tracing::Span::current().record("accessory_id", tracing::field::display(&id));
        tracing::info!(accessory_id = %id, title = %accessory.product_title, "created accessory");

        Ok(id)
    }

    #[tracing::instrument(
        name = "api.update_accessory",
        skip(self, update),
        fields(request_id = tracing::field::Empty, accessory_id = %accessory),
        err
    )]
    async fn update_accessory(
        &self,
        accessory: &AccessoryId,
        update: &NewAccessory,
    ) -> Result<(), ApiError> {
        let url = self.url(["accessories", accessory.as_str()])?;

        self.send_empty(self.http.patch(url).json(update)).await
    }

    #[tracing::instrument(
        name = "api.update_accessory_details",
        skip(self, update),
        fields(
            request_id = tracing::field::Empty,
            accessory_id = %accessory,
            section = %update.section,
            rows = update.data.len()
        ),
        err
    )]
    async fn update_accessory_details(
        &self,
        accessory: &AccessoryId,
        update: &DetailsUpdate,
    ) -> Result<(), ApiError> {
        let url = self.url(["accessories", accessory.as_str(), "details"])?;

        self.send_empty(self.http.patch(url).json(update)).await
    }

    #[tracing::instrument(
        name = "api.update_accessory_images",
        skip(self, changes),
        fields(
            request_id = tracing::field::Empty,
            accessory_id = %accessory,
            uploads = changes.upload_count()
        ),
        err
    )]
    async fn update_accessory_images(
        &self,
        accessory: &AccessoryId,
        changes: &ImageChanges,
    ) -> Result<(), ApiError> {
        let url = self.url(["accessories", accessory.as_str(), "images"])?;
        let form = multipart::image_changes(changes)?;

        self.send_empty(self.http.patch(url).multipart(form)).await
    }

    #[tracing::instrument(
        name = "api.submit_enquiry",
        skip(self, enquiry),
        fields(request_id = tracing::field::Empty, product_id = %enquiry.product_id),
        err
    )]
    async fn submit_enquiry(&self, enquiry: &Enquiry) -> Result<(), ApiError> {
        let url = self.url(["contact", "product-enquiry"])?;

        self.send_empty(self.http.post(url).json(enquiry)).await?;

        tracing::info!(product_id = %enquiry.product_id, "submitted enquiry");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() -> TestResult {
        let api = HttpCatalogApi::new("http://localhost:8000/api/", None, Duration::from_secs(5))?;

        assert_eq!(api.url(["products"])?.as_str(), "http://localhost:8000/api/products");

        Ok(())
    }

    #[test]
    fn ids_are_encoded_as_single_segments() -> TestResult {
        let api = HttpCatalogApi::new("http://localhost:8000/api", None, Duration::from_secs(5))?;

        let url = api.url(["products", "p1/models?x=1"])?;

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/products/p1%2Fmodels%3Fx=1"
        );

        Ok(())
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let result = HttpCatalogApi::new("localhost:8000/api", None, Duration::from_secs(5));

        assert!(
            matches!(result, Err(ApiError::BaseUrl(_))),
            "expected base url error, got {result:?}"
        );
    }

    #[test]
    fn blank_token_is_dropped_and_never_printed() -> TestResult {
        let blank = HttpCatalogApi::new(
            "http://localhost",
            Some(Zeroizing::new("  ".to_string())),
            Duration::from_secs(5),
        )?;
        let secret = HttpCatalogApi::new(
            "http://localhost",
            Some(Zeroizing::new("s3cret".to_string())),
            Duration::from_secs(5),
        )?;

        assert!(blank.token.is_none());
        assert!(!format!("{secret:?}").contains("s3cret"));

        Ok(())
    }

    #[test]
    fn model_paths_nest_under_products() -> TestResult {
        let api = HttpCatalogApi::new("http://localhost/api", None, Duration::from_secs(5))?;

        let url = api.model_url(&ProductId::new("p1"), &ModelId::new("m1"), &["details"])?;

        assert_eq!(url.path(), "/api/products/p1/models/m1/details");

        Ok(())
    }

    #[test]
    fn status_filters_map_to_endpoints() {
        assert_eq!(status_segment(StatusFilter::All), None);
        assert_eq!(status_segment(StatusFilter::Pending), Some("pending"));
        assert_eq!(status_segment(StatusFilter::Live), Some("live"));
    }
}
