//! Blob object URLs for showing the selected image.
//!
//! The bytes are wrapped in a `Blob` with the source's MIME type and
//! exposed through `URL.createObjectURL`. The URL keeps the Blob alive
//! until revoked, so every [`BlobUrl`] must end up in a
//! [`PreviewSlot`](fruitlens_core::PreviewSlot), which revokes it when the
//! next image replaces it or the page tears down.

use fruitlens_core::{ImageSource, ReleasePreview};
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a preview URL.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// A `blob:` URL that is revoked on release.
#[derive(Debug, PartialEq, Eq)]
pub struct BlobUrl {
    url: String,
    revoked: bool,
}

impl BlobUrl {
    /// Create an object URL for `source`'s bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
    pub fn from_source(source: &ImageSource) -> Result<Self, PreviewError> {
        let uint8_array = js_sys::Uint8Array::from(source.bytes());
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(source.mime_type());
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        tracing::debug!(%url, "created preview url");
        Ok(Self {
            url,
            revoked: false,
        })
    }

    /// The `blob:` URL for an `<img src>`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl ReleasePreview for BlobUrl {
    fn release(&mut self) {
        if self.revoked {
            return;
        }
        self.revoked = true;
        // Best-effort: the document may already be gone.
        let _ = web_sys::Url::revoke_object_url(&self.url);
        tracing::debug!(url = %self.url, "revoked preview url");
    }
}
