//! Image sources and the media-type allow-list.

use std::fmt;
use std::rc::Rc;

/// Image formats the classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
}

impl MediaType {
    /// All accepted formats, in the order shown to the user.
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Gif];

    /// Parse a declared MIME type.
    ///
    /// Matching is exact apart from ASCII case and surrounding
    /// whitespace; `image/jpg`, `image/webp` and friends are rejected.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.mime().eq_ignore_ascii_case(mime))
    }

    /// The canonical MIME string.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Value for an `<input type="file" accept=...>` attribute.
    #[must_use]
    pub fn accept_attribute() -> String {
        Self::ALL.map(Self::mime).join(",")
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// The raw image the user supplied.
///
/// Bytes are reference counted so the same upload can back the preview,
/// the request body, and later crops without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    bytes: Rc<[u8]>,
    mime_type: String,
    filename: String,
}

impl ImageSource {
    /// Wrap bytes with the MIME type and filename the browser reported.
    #[must_use]
    pub fn new(
        bytes: impl Into<Rc<[u8]>>,
        mime_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            filename: filename.into(),
        }
    }

    /// Encoded image bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type as declared by the source, unvalidated.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Original filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The declared type, if it is one we accept.
    #[must_use]
    pub fn media_type(&self) -> Option<MediaType> {
        MediaType::from_mime(&self.mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_jpeg_png_gif() {
        assert_eq!(MediaType::from_mime("image/jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_mime("image/gif"), Some(MediaType::Gif));
        assert_eq!(MediaType::from_mime(" IMAGE/PNG "), Some(MediaType::Png));

        for rejected in ["image/webp", "image/jpg", "image/bmp", "text/plain", "", "image/"] {
            assert_eq!(MediaType::from_mime(rejected), None, "{rejected:?} should be rejected");
        }
    }

    #[test]
    fn accept_attribute_lists_all_types() {
        assert_eq!(MediaType::accept_attribute(), "image/jpeg,image/png,image/gif");
    }

    #[test]
    fn source_reports_declared_type() {
        let src = ImageSource::new(vec![1, 2, 3], "image/gif", "a.gif");
        assert_eq!(src.media_type(), Some(MediaType::Gif));
        assert_eq!(src.bytes(), &[1, 2, 3]);
        assert_eq!(src.filename(), "a.gif");

        let bad = ImageSource::new(Vec::<u8>::new(), "application/pdf", "a.pdf");
        assert_eq!(bad.media_type(), None);
    }
}
