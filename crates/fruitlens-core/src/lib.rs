//! fruitlens-core: image acquisition, cropping, and classification
//! session state (sans-IO).
//!
//! Everything the fruitlens front-end decides lives here: which pasted
//! or dropped item becomes the active image, which media types are
//! accepted, where the initial crop box goes, how a crop is rasterized
//! into a JPEG, how the page theme follows the predicted label, and
//! which request's answer is allowed to update the screen.
//!
//! This crate performs no browser or network I/O. The [`Session`] hands
//! out [`Submission`]s that `fruitlens-io` uploads, and receives their
//! outcomes back through [`Session::finish`].

pub mod acquire;
pub mod classify;
pub mod config;
pub mod crop;
pub mod media;
pub mod notify;
pub mod preview;
pub mod raster;
pub mod session;
pub mod theme;

pub use classify::{ClassificationResult, ClassifyError, Prediction, parse_prediction};
pub use config::{ClientConfig, ConfigError};
pub use crop::{
    CropAdapter, CropRegion, CropUnit, Dimensions, PixelRect, initialize_crop, to_pixel_rect,
};
pub use media::{ImageSource, MediaType};
pub use notify::{Notice, NoticeKind, NoticeQueue, Notifier};
pub use preview::{PreviewSlot, ReleasePreview};
pub use raster::RasterError;
pub use session::{Mode, Session, Submission};
pub use theme::{Rgb, Theme};
