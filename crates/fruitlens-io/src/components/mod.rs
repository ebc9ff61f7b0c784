//! Dioxus UI components for fruitlens.
//!
//! Provides the drop zone with file picker, the plain image preview, the
//! crop box, the notice stack, and the result panel.

mod crop_controls;
mod cropper;
mod drop_zone;
mod image_preview;
mod result_panel;
mod toaster;

pub use crop_controls::CropControls;
pub use cropper::Cropper;
pub use drop_zone::DropZone;
pub use image_preview::ImagePreview;
pub use result_panel::ResultPanel;
pub use toaster::Toaster;
