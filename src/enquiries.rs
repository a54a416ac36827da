//! Enquiries
//!
//! Storefront contact form. Submissions are write-only: the client never reads
//! them back.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Accessory, Product, ProductId},
    forms::SectionForm,
    validation::{ValidationError, require_text},
};

/// Enquiry body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    /// Sender name.
    pub name: String,

    /// Sender email.
    pub email: String,

    /// Sender phone.
    pub phone: String,

    /// Free-text message.
    pub message: String,

    /// Product asked about.
    pub product_id: ProductId,

    /// Product title at the time of asking.
    pub product_title: String,

    /// Product thumbnail URL.
    #[serde(default)]
    pub product_image_url: String,
}

/// The storefront's enquiry dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryForm {
    /// Sender name.
    pub name: String,

    /// Sender email.
    pub email: String,

    /// Sender phone.
    pub phone: String,

    /// Free-text message.
    pub message: String,

    /// Product asked about.
    pub product_id: ProductId,

    /// Product title.
    pub product_title: String,

    /// Product thumbnail URL.
    pub product_image_url: String,
}

impl EnquiryForm {
    /// Blank form about a product.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self::blank(
            product.id.clone(),
            &product.product_title,
            product.thumbnail().map(|image| image.url.as_str()),
        )
    }

    /// Blank form about an accessory; accessories share the product id space.
    #[must_use]
    pub fn for_accessory(accessory: &Accessory) -> Self {
        Self::blank(
            ProductId::new(accessory.id.as_str()),
            &accessory.product_title,
            accessory.thumbnail().map(|image| image.url.as_str()),
        )
    }

    fn blank(product_id: ProductId, title: &str, image: Option<&str>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            product_id,
            product_title: title.to_string(),
            product_image_url: image.unwrap_or_default().to_string(),
        }
    }
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = require_text("email", email)?;

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });

    if !valid || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid("email", "not an email address"));
    }

    Ok(email)
}

fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let phone = require_text("phone", phone)?;

    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-') || (i == 0 && c == '+'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !allowed || !(7..=15).contains(&digits) {
        return Err(ValidationError::invalid("phone", "expected 7 to 15 digits"));
    }

    Ok(phone)
}

impl SectionForm for EnquiryForm {
    type Payload = Enquiry;

    fn section(&self) -> &'static str {
        "enquiry"
    }

    fn validate(&self) -> Result<Enquiry, ValidationError> {
        if self.product_id.is_blank() {
            return Err(ValidationError::Required("productId"));
        }

        Ok(Enquiry {
            name: require_text("name", &self.name)?,
            email: validate_email(&self.email)?,
            phone: validate_phone(&self.phone)?,
            message: require_text("message", &self.message)?,
            product_id: self.product_id.clone(),
            product_title: self.product_title.trim().to_string(),
            product_image_url: self.product_image_url.trim().to_string(),
        })
    }
}
