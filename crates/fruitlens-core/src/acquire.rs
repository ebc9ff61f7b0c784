//! Picking the one image payload out of each acquisition source.
//!
//! The file picker and drag-and-drop deliver a file list; only the first
//! entry is used and type validation happens later in
//! [`Session::select_image`](crate::session::Session::select_image).
//! Clipboard pastes deliver a mixed item list (text, HTML, files); the
//! first item whose type mentions `image` wins.

/// Where an image came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `<input type="file">` change event.
    FilePicker,
    /// Drop onto the drop zone.
    Drop,
    /// Paste anywhere on the page.
    Clipboard,
}

/// First entry of a file list, if any.
pub fn first_file<T>(files: impl IntoIterator<Item = T>) -> Option<T> {
    files.into_iter().next()
}

/// First clipboard item whose declared type indicates an image.
///
/// `declared_type` extracts the item's type string (e.g. the
/// `DataTransferItem.type` of a browser clipboard item).
pub fn first_image<T, S: AsRef<str>>(
    items: impl IntoIterator<Item = T>,
    declared_type: impl Fn(&T) -> S,
) -> Option<T> {
    items
        .into_iter()
        .find(|item| is_image_type(declared_type(item).as_ref()))
}

/// Loose check used for clipboard items: any type mentioning `image`.
///
/// This only decides which item to read; the strict allow-list is
/// applied afterwards.
#[must_use]
pub fn is_image_type(declared: &str) -> bool {
    declared.contains("image")
}
