//! Image paste via the browser `paste` event.
//!
//! [`PasteListener`] registers a window-level `paste` handler when
//! created and removes it when dropped, so the subscription lives exactly
//! as long as the component that owns it. All functions require a
//! browser environment (`wasm32-unknown-unknown` target).

use fruitlens_core::{ImageSource, acquire};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;

/// Errors that can occur when accessing pasted or dropped files.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// A window `paste` subscription that forwards the first pasted image file.
pub struct PasteListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::ClipboardEvent)>,
}

impl PasteListener {
    /// Start listening. `on_image` receives the first clipboard item whose
    /// type indicates an image; pastes without one are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::JsError`] if there is no global window or
    /// the listener cannot be registered.
    pub fn new(mut on_image: impl FnMut(web_sys::File) + 'static) -> Result<Self, ClipboardError> {
        let window =
            web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;

        let callback = Closure::<dyn FnMut(web_sys::ClipboardEvent)>::new(
            move |event: web_sys::ClipboardEvent| {
                if let Some(file) = first_image_file(&event) {
                    on_image(file);
                }
            },
        );
        window.add_event_listener_with_callback("paste", callback.as_ref().unchecked_ref())?;
        tracing::debug!("paste listener registered");

        Ok(Self { window, callback })
    }
}

impl Drop for PasteListener {
    fn drop(&mut self) {
        // Best-effort: the window may already be shutting down.
        let _ = self
            .window
            .remove_event_listener_with_callback("paste", self.callback.as_ref().unchecked_ref());
        tracing::debug!("paste listener removed");
    }
}

/// Pick the first image-typed item out of a paste event.
fn first_image_file(event: &web_sys::ClipboardEvent) -> Option<web_sys::File> {
    let items = event.clipboard_data()?.items();
    let candidates = (0..items.length()).filter_map(|i| items.get(i));
    let item = acquire::first_image(candidates, web_sys::DataTransferItem::type_)?;
    match item.get_as_file() {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = ?e, "pasted item could not be read as a file");
            None
        }
    }
}

/// Read a browser `File` into an [`ImageSource`], keeping its declared
/// type and name.
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if the file contents cannot be read.
#[allow(clippy::future_not_send)] // WASM is single-threaded; File is !Send
pub async fn read_file(file: &web_sys::File) -> Result<ImageSource, ClipboardError> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageSource::new(bytes, file.type_(), file.name()))
}
