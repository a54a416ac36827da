//! Wizard Sessions
//!
//! A session pairs a stage controller with the forms of each stage and saves
//! the active one through the catalog API. The controller decides where the
//! user may go; the forms keep what the user typed, so moving back and forth
//! never loses input.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use medstore::{
    catalog::ImageChanges,
    forms::{AccessoryForm, ColorForm, DetailsForm, ImagesForm, ModelForm, ProductForm},
    wizard::{
        AccessoryFlow, Advance, ColorFlow, Flow, ModelFlow, Produced, ProductFlow, StageSpec,
        Wizard, WizardError, WizardIds,
    },
};

use crate::{
    api::CatalogApi,
    editor::{EditorError, SavingFlag, save_section},
    notify::Notifier,
};

/// Errors raised while driving a wizard.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Saving the active stage failed.
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// The controller refused the transition.
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// The forms behind every stage of one flow.
#[async_trait]
pub trait StageForms: Default + Send + Sync {
    /// Flow these forms fill.
    type Flow: Flow + Send + Sync;

    /// Save the form of `stage` for `target`.
    ///
    /// # Errors
    ///
    /// Returns the validation or submission failure.
    async fn save_stage(
        &mut self,
        stage: usize,
        target: &WizardIds,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Result<Produced, EditorError>;
}

async fn save_color(
    color: &mut ColorForm,
    target: &WizardIds,
    api: &dyn CatalogApi,
    notifier: &dyn Notifier,
) -> Result<Produced, EditorError> {
    let (produced, _) = save_section(color, target, api, notifier).await?;

    color.mark_uploaded();

    Ok(produced)
}

/// Forms of the product wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStages {
    /// Product basics and base price.
    pub product: ProductForm,

    /// First model.
    pub model: ModelForm,

    /// First color.
    pub color: ColorForm,

    /// Model details.
    pub details: DetailsForm,
}

impl Default for ProductStages {
    fn default() -> Self {
        Self {
            product: ProductForm::default(),
            model: ModelForm::default(),
            color: ColorForm::default(),
            details: DetailsForm::empty_model(),
        }
    }
}

#[async_trait]
impl StageForms for ProductStages {
    type Flow = ProductFlow;

    async fn save_stage(
        &mut self,
        stage: usize,
        target: &WizardIds,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Result<Produced, EditorError> {
        match stage {
            ProductFlow::PRODUCT => {
                let (produced, _) = save_section(&self.product, target, api, notifier).await?;

                if self.color.prices.is_empty() {
                    self.color.prices.push(self.product.price.clone());
                }

                Ok(produced)
            }
            ProductFlow::MODEL => save_section(&self.model, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            ProductFlow::COLOR => save_color(&mut self.color, target, api, notifier).await,
            ProductFlow::DETAILS => save_section(&self.details, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            other => Err(EditorError::UnknownStage(other)),
        }
    }
}

/// Forms of the "add model" wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStages {
    /// The new model.
    pub model: ModelForm,

    /// Its first color.
    pub color: ColorForm,

    /// Its details.
    pub details: DetailsForm,
}

impl Default for ModelStages {
    fn default() -> Self {
        Self {
            model: ModelForm::default(),
            color: ColorForm::default(),
            details: DetailsForm::empty_model(),
        }
    }
}

#[async_trait]
impl StageForms for ModelStages {
    type Flow = ModelFlow;

    async fn save_stage(
        &mut self,
        stage: usize,
        target: &WizardIds,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Result<Produced, EditorError> {
        match stage {
            ModelFlow::MODEL => save_section(&self.model, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            ModelFlow::COLOR => save_color(&mut self.color, target, api, notifier).await,
            ModelFlow::DETAILS => save_section(&self.details, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            other => Err(EditorError::UnknownStage(other)),
        }
    }
}

/// Form of the "add color" wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorStages {
    /// The new color.
    pub color: ColorForm,
}

#[async_trait]
impl StageForms for ColorStages {
    type Flow = ColorFlow;

    async fn save_stage(
        &mut self,
        stage: usize,
        target: &WizardIds,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Result<Produced, EditorError> {
        if stage != 0 {
            return Err(EditorError::UnknownStage(stage));
        }

        save_color(&mut self.color, target, api, notifier).await
    }
}

/// Forms of the accessory wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryStages {
    /// Basics, price and stock.
    pub basic: AccessoryForm,

    /// Product and gallery shots.
    pub images: ImagesForm,

    /// Array sections.
    pub details: DetailsForm,
}

impl Default for AccessoryStages {
    fn default() -> Self {
        Self {
            basic: AccessoryForm::default(),
            images: ImagesForm::default(),
            details: DetailsForm::empty_accessory(),
        }
    }
}

#[async_trait]
impl StageForms for AccessoryStages {
    type Flow = AccessoryFlow;

    async fn save_stage(
        &mut self,
        stage: usize,
        target: &WizardIds,
        api: &dyn CatalogApi,
        notifier: &dyn Notifier,
    ) -> Result<Produced, EditorError> {
        match stage {
            AccessoryFlow::BASIC => save_section(&self.basic, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            AccessoryFlow::IMAGES => {
                let (produced, changes) =
                    save_section(&self.images, target, api, notifier).await?;

                // Uploaded files are now on the server; a re-save must not send them twice.
                self.images.product_image_count += changes.product_images.len();
                self.images.gallery_image_count += changes.gallery_images.len();
                self.images.changes = ImageChanges::default();

                Ok(produced)
            }
            AccessoryFlow::DETAILS => save_section(&self.details, target, api, notifier)
                .await
                .map(|(produced, _)| produced),
            other => Err(EditorError::UnknownStage(other)),
        }
    }
}

/// A running wizard: controller, forms and the collaborators it saves through.
pub struct WizardSession<S: StageForms> {
    wizard: Wizard<S::Flow>,
    forms: S,
    saving: SavingFlag,
    api: Arc<dyn CatalogApi>,
    notifier: Arc<dyn Notifier>,
}

impl<S: StageForms + std::fmt::Debug> std::fmt::Debug for WizardSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSession")
            .field("flow", &<S::Flow as Flow>::NAME)
            .field("stage", &self.wizard.stage())
            .field("max_reached", &self.wizard.max_reached())
            .field("ids", self.wizard.ids())
            .field("forms", &self.forms)
            .finish_non_exhaustive()
    }
}

/// Product creation session.
pub type ProductWizard = WizardSession<ProductStages>;

/// "Add model" session scoped to a product.
pub type ModelWizard = WizardSession<ModelStages>;

/// "Add color" session scoped to a model.
pub type ColorWizard = WizardSession<ColorStages>;

/// Accessory creation session.
pub type AccessoryWizard = WizardSession<AccessoryStages>;

impl<S: StageForms> WizardSession<S> {
    /// A fresh session with blank forms.
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self::scoped(WizardIds::default(), S::default(), api, notifier)
    }

    /// A session under existing records, starting from `forms`.
    pub fn scoped(
        scope: WizardIds,
        forms: S,
        api: Arc<dyn CatalogApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            wizard: Wizard::scoped(scope),
            forms,
            saving: SavingFlag::default(),
            api,
            notifier,
        }
    }

    /// Active stage.
    pub fn stage(&self) -> usize {
        self.wizard.stage()
    }

    /// Furthest unlocked stage.
    pub fn max_reached(&self) -> usize {
        self.wizard.max_reached()
    }

    /// Description of the active stage.
    pub fn current(&self) -> Option<&'static StageSpec> {
        self.wizard.current()
    }

    /// Ids gathered so far.
    pub fn ids(&self) -> &WizardIds {
        self.wizard.ids()
    }

    /// Whether a stage save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// Stage forms.
    pub fn forms(&self) -> &S {
        &self.forms
    }

    /// Stage forms, for edits between saves.
    pub fn forms_mut(&mut self) -> &mut S {
        &mut self.forms
    }

    /// Save the active stage and advance.
    ///
    /// Finishing the last stage resets the session and hands back every id
    /// gathered, so the caller can refresh its list.
    ///
    /// # Errors
    ///
    /// Returns the save failure with the stage unchanged, or the controller's
    /// refusal to advance.
    #[tracing::instrument(
        name = "wizard.save",
        skip(self),
        fields(flow = <S::Flow as Flow>::NAME, stage = self.wizard.stage()),
        err
    )]
    pub async fn save(&mut self) -> Result<Advance, SessionError> {
        let _guard = self.saving.begin()?;
        let stage = self.wizard.stage();

        let produced = self
            .forms
            .save_stage(
                stage,
                self.wizard.ids(),
                self.api.as_ref(),
                self.notifier.as_ref(),
            )
            .await?;

        let advance = self.wizard.complete(stage, produced)?;

        if let Advance::Finished(ids) = &advance {
            tracing::info!(ids = ?ids, "wizard finished");

            self.reset();
        }

        Ok(advance)
    }

    /// Save every remaining stage in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error; the session stays on that stage.
    pub async fn save_all(&mut self) -> Result<WizardIds, SessionError> {
        loop {
            if let Advance::Finished(ids) = self.save().await? {
                return Ok(ids);
            }
        }
    }

    /// Move to an unlocked stage without touching any form.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Locked` for a stage not yet reached.
    pub fn go_to(&mut self, stage: usize) -> Result<(), SessionError> {
        self.wizard.go_to(stage)?;

        Ok(())
    }

    /// Abandon the session. Records already created stay on the server.
    pub fn cancel(&mut self) {
        let created = self.wizard.created();

        if created != WizardIds::default() {
            tracing::warn!(
                flow = <S::Flow as Flow>::NAME,
                orphaned = ?created,
                "wizard cancelled with records already created"
            );
        }

        self.reset();
    }

    fn reset(&mut self) {
        self.wizard.reset();
        self.forms = S::default();
    }
}

#[cfg(test)]
mod tests {
    use medstore::{
        catalog::{AccessoryId, ColorId, DetailSection, ImageUpload, ModelId, ProductId},
        forms::PriceField,
        wizard::IdKind,
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{api::MockCatalogApi, notify::MockNotifier};

    use super::*;

    fn relaxed_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier.expect_success().return_const(());
        notifier.expect_failure().return_const(());

        notifier
    }

    fn fill_product(stages: &mut ProductStages) {
        stages.product.product_title = "Test Monitor".to_string();
        stages.product.description = "A monitor".to_string();
        stages.product.price = PriceField::new(Decimal::from(15_000));
        stages.model.model_name = "MX-12".to_string();
    }

    #[tokio::test]
    async fn backward_navigation_keeps_ids_and_forms() -> TestResult {
        let mut api = MockCatalogApi::new();

        api.expect_create_product()
            .once()
            .returning(|_| Ok(ProductId::new("p1")));
        api.expect_create_model()
            .once()
            .withf(|product, model| product.as_str() == "p1" && model.model_name == "MX-12")
            .returning(|_, _| Ok(ModelId::new("m1")));
        api.expect_update_product()
            .once()
            .withf(|product, update| product.as_str() == "p1" && update.product_title == "Test Monitor")
            .returning(|_, _| Ok(()));

        let mut session = ProductWizard::new(Arc::new(api), Arc::new(relaxed_notifier()));

        fill_product(session.forms_mut());

        assert_eq!(session.save().await?, Advance::Next(1));
        assert_eq!(session.save().await?, Advance::Next(2));

        session.go_to(0)?;

        assert_eq!(session.forms().product.product_title, "Test Monitor");
        assert_eq!(session.ids().model, Some(ModelId::new("m1")));

        assert_eq!(session.save().await?, Advance::Next(1));
        assert_eq!(session.max_reached(), 2);
        assert_eq!(session.forms().model.model_name, "MX-12");
        assert_eq!(session.ids().product, Some(ProductId::new("p1")));

        Ok(())
    }

    #[tokio::test]
    async fn product_price_prefills_first_color() -> TestResult {
        let mut api = MockCatalogApi::new();

        api.expect_create_product()
            .once()
            .returning(|_| Ok(ProductId::new("p1")));

        let mut session = ProductWizard::new(Arc::new(api), Arc::new(relaxed_notifier()));

        fill_product(session.forms_mut());
        session.save().await?;

        assert_eq!(
            session.forms().color.prices,
            vec![PriceField::new(Decimal::from(15_000))]
        );

        Ok(())
    }

    #[tokio::test]
    async fn resaving_a_color_does_not_upload_its_images_again() -> TestResult {
        let mut api = MockCatalogApi::new();

        api.expect_create_product()
            .once()
            .returning(|_| Ok(ProductId::new("p1")));
        api.expect_create_model()
            .once()
            .returning(|_, _| Ok(ModelId::new("m1")));
        api.expect_create_color()
            .once()
            .withf(|_, _, color| color.images.upload_count() == 3)
            .returning(|_, _, _| Ok(ColorId::new("c1")));
        api.expect_update_color_details()
            .once()
            .withf(|_, _, color, details| color.as_str() == "c1" && details.color_name == "Slate")
            .returning(|_, _, _, _| Ok(()));
        api.expect_update_color_images().never();

        let mut session = ProductWizard::new(Arc::new(api), Arc::new(relaxed_notifier()));

        fill_product(session.forms_mut());
        session.save().await?;
        session.save().await?;

        let color = &mut session.forms_mut().color;
        color.color_name = "Slate".to_string();
        color.main_image = Some(ImageUpload::new("slate.png", vec![1]));
        color.product_images.push(ImageUpload::new("side.png", vec![2]));
        color.gallery_images.push(ImageUpload::new("ward.png", vec![3]));

        assert_eq!(session.save().await?, Advance::Next(ProductFlow::DETAILS));

        session.go_to(ProductFlow::COLOR)?;

        assert_eq!(session.save().await?, Advance::Next(ProductFlow::DETAILS));
        assert_eq!(session.ids().color, Some(ColorId::new("c1")));

        Ok(())
    }

    #[tokio::test]
    async fn cannot_skip_ahead() {
        let mut session = ProductWizard::new(
            Arc::new(MockCatalogApi::new()),
            Arc::new(relaxed_notifier()),
        );

        let result = session.go_to(ProductFlow::COLOR);

        assert!(
            matches!(result, Err(SessionError::Wizard(WizardError::Locked { .. }))),
            "expected locked stage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn model_wizard_without_product_cannot_save() {
        let mut api = MockCatalogApi::new();

        api.expect_create_model().never();

        let mut session = ModelWizard::new(Arc::new(api), Arc::new(relaxed_notifier()));

        session.forms_mut().model.model_name = "MX-12".to_string();

        let result = session.save().await;

        assert!(
            matches!(
                result,
                Err(SessionError::Editor(EditorError::MissingTarget(IdKind::Product)))
            ),
            "expected missing product, got {result:?}"
        );
        assert_eq!(session.stage(), 0);
    }

    #[tokio::test]
    async fn cancel_resets_to_scope() -> TestResult {
        let mut api = MockCatalogApi::new();

        api.expect_create_model()
            .once()
            .returning(|_, _| Ok(ModelId::new("m9")));
        api.expect_delete_model().never();

        let mut session = ModelWizard::scoped(
            WizardIds::for_product(ProductId::new("p1")),
            ModelStages::default(),
            Arc::new(api),
            Arc::new(relaxed_notifier()),
        );

        session.forms_mut().model.model_name = "MX-14".to_string();
        session.save().await?;

        session.cancel();

        assert_eq!(session.stage(), 0);
        assert_eq!(session.ids(), &WizardIds::for_product(ProductId::new("p1")));
        assert!(session.forms().model.model_name.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn accessory_wizard_runs_to_completion() -> TestResult {
        let mut api = MockCatalogApi::new();

        api.expect_create_accessory()
            .once()
            .returning(|_| Ok(AccessoryId::new("a1")));
        api.expect_update_accessory_images()
            .once()
            .withf(|accessory, changes| {
                accessory.as_str() == "a1" && changes.product_images.len() == 1
            })
            .returning(|_, _| Ok(()));
        api.expect_update_accessory_details()
            .times(3)
            .returning(|_, _| Ok(()));

        let mut session = AccessoryWizard::new(Arc::new(api), Arc::new(relaxed_notifier()));

        let basic = &mut session.forms_mut().basic;
        basic.product_title = "Surgical Gloves".to_string();
        basic.description = "Nitrile, box of 100".to_string();
        basic.price = Some(Decimal::from(250));

        assert_eq!(session.save().await?, Advance::Next(AccessoryFlow::IMAGES));

        session
            .forms_mut()
            .images
            .changes
            .product_images
            .push(ImageUpload::new("gloves.png", vec![1, 2]));

        assert_eq!(session.save().await?, Advance::Next(AccessoryFlow::DETAILS));

        let specifications = session
            .forms_mut()
            .details
            .points_mut(DetailSection::Specifications)
            .ok_or("missing specifications")?;
        let row = specifications.add_item();
        specifications.edit_item(row, "points", "Powder free")?;

        let advance = session.save().await?;

        assert!(
            matches!(advance, Advance::Finished(ref ids) if ids.accessory == Some(AccessoryId::new("a1"))),
            "unexpected advance {advance:?}"
        );
        assert_eq!(session.stage(), 0);

        Ok(())
    }
}
