//! Multipart bodies for image-carrying requests.

use reqwest::multipart::{Form, Part};

use medstore::catalog::{ImageChanges, ImageUpload, NewColor};

use super::ApiError;

fn file_part(upload: &ImageUpload) -> Result<Part, ApiError> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(upload.content_type)
        .map_err(ApiError::Http)
}

fn json_field<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|error| ApiError::Encode(error.to_string()))
}

fn with_images(mut form: Form, changes: &ImageChanges) -> Result<Form, ApiError> {
    if let Some(main) = &changes.main_image {
        form = form.part("mainImage", file_part(main)?);
    }

    for upload in &changes.product_images {
        form = form.part("productImages", file_part(upload)?);
    }

    for upload in &changes.gallery_images {
        form = form.part("galleryImages", file_part(upload)?);
    }

    Ok(form)
}

/// Fields and files of a new color.
pub(super) fn new_color(color: &NewColor) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("colorName", color.details.color_name.clone())
        .text("stock", color.details.stock.to_string())
        .text("colorPrice", json_field(&color.details.color_price)?);

    with_images(form, &color.images)
}

/// An `images` section update.
pub(super) fn image_changes(changes: &ImageChanges) -> Result<Form, ApiError> {
    let mut form = Form::new().text("section", "images");

    if !changes.delete_product_indexes.is_empty() {
        form = form.text(
            "deleteProductIndexes",
            json_field(changes.delete_product_indexes.as_slice())?,
        );
    }

    if !changes.delete_gallery_indexes.is_empty() {
        form = form.text(
            "deleteGalleryIndexes",
            json_field(changes.delete_gallery_indexes.as_slice())?,
        );
    }

    if let Some(index) = changes.index {
        form = form.text("index", index.to_string());
    }

    with_images(form, changes)
}

#[cfg(test)]
mod tests {
    use medstore::catalog::{ColorDetailsUpdate, PriceInput};
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_color_form_has_a_boundary() -> TestResult {
        let color = NewColor {
            details: ColorDetailsUpdate {
                color_name: "Slate".to_string(),
                stock: 4,
                color_price: vec![PriceInput {
                    currency: "INR".to_string(),
                    price: Decimal::from(15_000),
                    discount: Decimal::ZERO,
                }],
            },
            images: ImageChanges {
                main_image: Some(ImageUpload::new("slate.png", vec![1, 2, 3])),
                ..ImageChanges::default()
            },
        };

        let form = new_color(&color)?;

        assert!(!form.boundary().is_empty());

        Ok(())
    }

    #[test]
    fn image_changes_accept_deletes_only() -> TestResult {
        let changes = ImageChanges {
            delete_gallery_indexes: smallvec![0, 2],
            ..ImageChanges::default()
        };

        assert!(image_changes(&changes).is_ok());

        Ok(())
    }
}
