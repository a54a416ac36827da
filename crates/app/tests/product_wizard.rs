//! Product creation from first save to details, against a mocked backend.

use std::sync::{Arc, Mutex};

use medstore::{
    catalog::{
        ColorId, DetailSection, DetailsUpdate, ImageUpload, ModelId, Point, ProductId, SectionData,
    },
    wizard::{Advance, WizardIds},
};
use medstore_app::{
    api::MockCatalogApi,
    editor::EditorError,
    notify::MockNotifier,
    wizards::{ProductWizard, SessionError},
};
use rust_decimal::Decimal;
use testresult::TestResult;

fn is_validation(result: &Result<Advance, SessionError>) -> bool {
    matches!(
        result,
        Err(SessionError::Editor(EditorError::Validation(_)))
    )
}

#[tokio::test]
async fn monitor_is_created_stage_by_stage() -> TestResult {
    let sent_details = Arc::new(Mutex::new(Vec::<DetailsUpdate>::new()));
    let captured = Arc::clone(&sent_details);

    let mut api = MockCatalogApi::new();

    api.expect_create_product()
        .once()
        .withf(|product| {
            product.product_title == "Test Monitor" && product.price == Decimal::from(15_000)
        })
        .returning(|_| Ok(ProductId::new("p1")));

    api.expect_create_model()
        .once()
        .withf(|product, model| product.as_str() == "p1" && model.model_name == "MX-12")
        .returning(|_, _| Ok(ModelId::new("m1")));

    api.expect_create_color()
        .once()
        .withf(|_, model, color| model.as_str() == "m1" && color.images.main_image.is_some())
        .returning(|_, _, _| Ok(ColorId::new("c1")));

    api.expect_update_model_details()
        .times(DetailSection::ALL.len())
        .returning(move |_, _, update| {
            if let Ok(mut sent) = captured.lock() {
                sent.push(update.clone());
            }

            Ok(())
        });

    api.expect_update_product().never();
    api.expect_update_model().never();
    api.expect_delete_model().never();

    let mut notifier = MockNotifier::new();

    notifier.expect_failure().times(2).return_const(());
    notifier.expect_success().times(4).return_const(());

    let mut wizard = ProductWizard::new(Arc::new(api), Arc::new(notifier));

    let forms = wizard.forms_mut();
    forms.product.product_title = "Test Monitor".to_string();
    forms.product.description = "A monitor".to_string();

    let result = wizard.save().await;

    assert!(is_validation(&result), "missing price must block, got {result:?}");
    assert_eq!(wizard.max_reached(), 0);

    wizard.forms_mut().product.price.price = Some(Decimal::from(15_000));

    assert_eq!(wizard.save().await?, Advance::Next(1));

    wizard.forms_mut().model.model_name = "MX-12".to_string();

    assert_eq!(wizard.save().await?, Advance::Next(2));

    wizard.forms_mut().color.color_name = "Slate".to_string();
    wizard.forms_mut().color.stock = 5;

    let result = wizard.save().await;

    assert!(is_validation(&result), "missing image must block, got {result:?}");
    assert_eq!(wizard.stage(), 2);

    wizard.forms_mut().color.main_image = Some(ImageUpload::new("slate.png", vec![0x89, 0x50]));

    assert_eq!(wizard.save().await?, Advance::Next(3));

    let specs = wizard
        .forms_mut()
        .details
        .points_mut(DetailSection::Specifications)
        .ok_or("specifications editor")?;

    let filled = specs.add_item();
    specs.edit_item(filled, "points", "Lightweight")?;

    let blank = specs.add_item();
    specs.edit_item(blank, "points", "")?;

    let finished = wizard.save().await?;

    assert_eq!(
        finished,
        Advance::Finished(WizardIds {
            product: Some(ProductId::new("p1")),
            model: Some(ModelId::new("m1")),
            color: Some(ColorId::new("c1")),
            accessory: None,
        })
    );

    let sent = sent_details.lock().map_err(|_err| "details lock poisoned")?;

    let specifications = sent
        .iter()
        .find(|update| update.section == DetailSection::Specifications)
        .map(|update| update.data.clone());

    assert_eq!(
        specifications,
        Some(SectionData::Points(vec![Point::new("Lightweight")]))
    );

    assert_eq!(wizard.stage(), 0, "a finished wizard starts over");

    Ok(())
}
