//! Images

use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A stored image as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageRepr")]
pub struct Image {
    /// Public URL.
    pub url: String,

    /// Storage handle, when the backend exposes one.
    #[serde(rename = "publicId", skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

impl Image {
    /// An image known only by URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: None,
        }
    }
}

/// Older records store bare URL strings, newer ones an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageRepr {
    Url(String),
    Object {
        #[serde(alias = "secure_url", alias = "imageUrl")]
        url: String,
        #[serde(default, alias = "public_id")]
        #[serde(rename = "publicId")]
        public_id: Option<String>,
    },
}

impl From<ImageRepr> for Image {
    fn from(repr: ImageRepr) -> Self {
        match repr {
            ImageRepr::Url(url) => Self::from_url(url),
            ImageRepr::Object { url, public_id } => Self { url, public_id },
        }
    }
}

/// A file to upload alongside a section's fields.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,

    /// MIME type sent with the part.
    pub content_type: &'static str,

    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap file bytes, inferring the MIME type from the extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Whether there is anything to upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Image edits submitted as one multipart request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageChanges {
    /// Replacement thumbnail.
    pub main_image: Option<ImageUpload>,

    /// Product images to append, or the single replacement when `index` is set.
    pub product_images: Vec<ImageUpload>,

    /// Gallery images to append.
    pub gallery_images: Vec<ImageUpload>,

    /// Positions of product images to remove.
    pub delete_product_indexes: SmallVec<[usize; 4]>,

    /// Positions of gallery images to remove.
    pub delete_gallery_indexes: SmallVec<[usize; 4]>,

    /// Product image position the first upload replaces.
    pub index: Option<usize>,
}

impl ImageChanges {
    /// Whether the request would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main_image.is_none()
            && self.product_images.is_empty()
            && self.gallery_images.is_empty()
            && self.delete_product_indexes.is_empty()
            && self.delete_gallery_indexes.is_empty()
    }

    /// Total number of files carried.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        usize::from(self.main_image.is_some())
            + self.product_images.len()
            + self.gallery_images.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_bare_and_object_images() -> TestResult {
        let images: Vec<Image> = serde_json::from_value(json!([
            "https://cdn.example.com/a.png",
            { "url": "https://cdn.example.com/b.png", "public_id": "b" }
        ]))?;

        assert_eq!(images.first(), Some(&Image::from_url("https://cdn.example.com/a.png")));
        assert_eq!(
            images.get(1).and_then(|image| image.public_id.as_deref()),
            Some("b")
        );

        Ok(())
    }

    #[test]
    fn infers_content_type_from_extension() {
        assert_eq!(ImageUpload::new("front.JPG", vec![1]).content_type, "image/jpeg");
        assert_eq!(ImageUpload::new("scan.bin", vec![1]).content_type, "application/octet-stream");
    }

    #[test]
    fn empty_changes_count_nothing() {
        let changes = ImageChanges::default();

        assert!(changes.is_empty());
        assert_eq!(changes.upload_count(), 0);
    }
}
