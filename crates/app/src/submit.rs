//! Section submission
//!
//! Binds each form to the endpoint that saves it. A form that can create its
//! entity creates on the first save and updates once the target carries the id.

use async_trait::async_trait;

use medstore::{
    catalog::DetailsUpdate,
    enquiries::EnquiryForm,
    forms::{
        AccessoryForm, ColorDetailsForm, ColorForm, DetailsForm, ImagesForm, ModelForm,
        ProductForm, RowsForm, SchemeForm, SectionForm, StatusForm, details::SectionRow,
    },
    ids::TypedId,
    validation::ValidationError,
    wizard::{IdKind, Produced, WizardIds},
};

use crate::{api::CatalogApi, editor::EditorError};

/// A form that knows which endpoint persists it.
#[async_trait]
pub trait Submit: SectionForm + Send + Sync {
    /// Send a validated payload for `target`.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::MissingTarget` when `target` lacks an id the
    /// endpoint is addressed by, or the API error.
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError>;
}

fn require<T>(id: Option<&TypedId<T>>, kind: IdKind) -> Result<&TypedId<T>, EditorError> {
    id.ok_or(EditorError::MissingTarget(kind))
}

#[async_trait]
impl Submit for ProductForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        if let Some(product) = &target.product {
            api.update_product(product, payload).await?;

            return Ok(Produced::Nothing);
        }

        Ok(Produced::Product(api.create_product(payload).await?))
    }
}

#[async_trait]
impl Submit for ModelForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        let product = require(target.product.as_ref(), IdKind::Product)?;

        if let Some(model) = &target.model {
            api.update_model(product, model, payload).await?;

            return Ok(Produced::Nothing);
        }

        Ok(Produced::Model(api.create_model(product, payload).await?))
    }
}

#[async_trait]
impl Submit for StatusForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        let product = require(target.product.as_ref(), IdKind::Product)?;
        let model = require(target.model.as_ref(), IdKind::Model)?;

        api.update_model_status(product, model, *payload).await?;

        Ok(Produced::Nothing)
    }
}

#[async_trait]
impl Submit for SchemeForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        let product = require(target.product.as_ref(), IdKind::Product)?;
        let model = require(target.model.as_ref(), IdKind::Model)?;

        api.update_model_scheme(product, model, *payload).await?;

        Ok(Produced::Nothing)
    }
}

#[async_trait]
impl Submit for ColorForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        let product = require(target.product.as_ref(), IdKind::Product)?;
        let model = require(target.model.as_ref(), IdKind::Model)?;

        if let Some(color) = &target.color {
            api.update_color_details(product, model, color, &payload.details)
                .await?;

            if !payload.images.is_empty() {
                api.update_color_images(product, model, color, &payload.images)
                    .await?;
            }

            return Ok(Produced::Nothing);
        }

        if payload.images.main_image.is_none() {
            return Err(ValidationError::Required("colorImage").into());
        }

        Ok(Produced::Color(
            api.create_color(product, model, payload).await?,
        ))
    }
}

#[async_trait]
impl Submit for ColorDetailsForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        let product = require(target.product.as_ref(), IdKind::Product)?;
        let model = require(target.model.as_ref(), IdKind::Model)?;
        let color = require(target.color.as_ref(), IdKind::Color)?;

        api.update_color_details(product, model, color, payload)
            .await?;

        Ok(Produced::Nothing)
    }
}

#[async_trait]
impl Submit for ImagesForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        if let Some(accessory) = &target.accessory {
            api.update_accessory_images(accessory, payload).await?;

            return Ok(Produced::Nothing);
        }

        let product = require(target.product.as_ref(), IdKind::Product)?;
        let model = require(target.model.as_ref(), IdKind::Model)?;
        let color = require(target.color.as_ref(), IdKind::Color)?;

        api.update_color_images(product, model, color, payload)
            .await?;

        Ok(Produced::Nothing)
    }
}

async fn submit_details(
    api: &dyn CatalogApi,
    target: &WizardIds,
    updates: &[DetailsUpdate],
) -> Result<Produced, EditorError> {
    if let Some(accessory) = &target.accessory {
        for update in updates {
            api.update_accessory_details(accessory, update).await?;
        }

        return Ok(Produced::Nothing);
    }

    let product = require(target.product.as_ref(), IdKind::Product)?;
    let model = require(target.model.as_ref(), IdKind::Model)?;

    for update in updates {
        api.update_model_details(product, model, update).await?;
    }

    Ok(Produced::Nothing)
}

#[async_trait]
impl<R: SectionRow + Send + Sync> Submit for RowsForm<R> {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        submit_details(api, target, std::slice::from_ref(payload)).await
    }
}

#[async_trait]
impl Submit for DetailsForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        submit_details(api, target, payload).await
    }
}

#[async_trait]
impl Submit for AccessoryForm {
    async fn submit(
        api: &dyn CatalogApi,
        target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        if let Some(accessory) = &target.accessory {
            api.update_accessory(accessory, payload).await?;

            return Ok(Produced::Nothing);
        }

        Ok(Produced::Accessory(api.create_accessory(payload).await?))
    }
}

#[async_trait]
impl Submit for EnquiryForm {
    async fn submit(
        api: &dyn CatalogApi,
        _target: &WizardIds,
        payload: &Self::Payload,
    ) -> Result<Produced, EditorError> {
        api.submit_enquiry(payload).await?;

        Ok(Produced::Nothing)
    }
}
