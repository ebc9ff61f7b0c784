//! fruitlens-io: Browser I/O and Dioxus component library.
//!
//! Handles the upload to the prediction endpoint, Blob-URL previews,
//! the window paste subscription, and the toast notifier, and provides
//! the UI components of the fruitlens web application.

pub mod client;
pub mod clipboard;
pub mod components;
pub mod notices;
pub mod preview;
pub mod state;

pub use client::PredictClient;
pub use clipboard::{ClipboardError, PasteListener, read_file};
pub use components::{CropControls, Cropper, DropZone, ImagePreview, ResultPanel, Toaster};
pub use notices::ToastNotifier;
pub use preview::{BlobUrl, PreviewError};
pub use state::{AppState, use_app_state, use_paste_images};
