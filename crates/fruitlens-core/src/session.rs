//! The acquisition → preview → crop → classify state machine.
//!
//! [`Session`] holds no I/O. Operations that need a network request
//! return a [`Submission`]; the caller performs it and reports back
//! through [`Session::finish`] (or [`Session::abandon`] if the request
//! was dropped). Every submission carries a generation number, and
//! completions for anything but the newest submission are discarded, so
//! a slow response for an old image can never overwrite a newer result.

use crate::acquire::{self, Origin};
use crate::classify::{ClassificationResult, ClassifyError};
use crate::crop::CropRegion;
use crate::media::{ImageSource, MediaType};
use crate::notify::{NoticeKind, Notifier};
use crate::raster;
use crate::theme::Theme;

/// Shown when a selected file is not JPEG, PNG or GIF.
pub const INVALID_IMAGE_MESSAGE: &str = "File is not a valid image.";

/// Shown after a successful classification.
pub const SUCCESS_MESSAGE: &str = "Image recognized successfully!";

/// Shown for any failed classify request.
pub const CONNECTIVITY_MESSAGE: &str = "Unable to connect to the server. Please try again later.";

/// What the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing selected yet.
    NoImage,
    /// Image shown, no request outstanding and no outcome yet.
    ///
    /// Never reported by [`Session`]: selecting an image submits it in the
    /// same step, so the mode goes straight to [`Mode::Submitting`]. Kept
    /// for front-ends that show a preview before uploading.
    PreviewReady,
    /// Image shown in the cropper.
    Cropping,
    /// A classify request is in flight.
    Submitting,
    /// The latest request produced a label.
    Result,
    /// The latest request failed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Pending,
    Classified,
    Failed,
}

/// A classify request the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a submission does nothing until the request is sent"]
pub struct Submission {
    generation: u64,
    source: ImageSource,
    cropped: bool,
}

impl Submission {
    /// Tag to hand back to [`Session::finish`].
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The image to upload.
    #[must_use]
    pub const fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Whether this uploads a crop rather than the full image.
    #[must_use]
    pub const fn is_cropped(&self) -> bool {
        self.cropped
    }
}

/// Application state for one page.
#[derive(Debug, Clone)]
pub struct Session {
    source: Option<ImageSource>,
    image_id: u64,
    cropping: bool,
    outcome: Outcome,
    result: Option<ClassificationResult>,
    result_is_cropped: bool,
    theme: Theme,
    generation: u64,
    in_flight: Option<InFlight>,
}

/// The newest outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    cropped: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            source: None,
            image_id: 0,
            cropping: false,
            outcome: Outcome::Pending,
            result: None,
            result_is_cropped: false,
            theme: Theme::default(),
            generation: 0,
            in_flight: None,
        }
    }
}

impl Session {
    /// A session with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.source.is_none() {
            Mode::NoImage
        } else if self.in_flight.is_some() {
            Mode::Submitting
        } else if self.cropping {
            Mode::Cropping
        } else {
            match self.outcome {
                Outcome::Pending => Mode::PreviewReady,
                Outcome::Classified => Mode::Result,
                Outcome::Failed => Mode::Failed,
            }
        }
    }

    /// The active image.
    #[must_use]
    pub const fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// Identifies the active image; changes on every accepted selection.
    #[must_use]
    pub const fn image_id(&self) -> u64 {
        self.image_id
    }

    /// Whether the cropper is shown instead of the plain preview.
    #[must_use]
    pub const fn is_cropping(&self) -> bool {
        self.cropping
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The latest classification of the active image.
    #[must_use]
    pub const fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    /// Page colors.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Validate and activate a new image, then submit it whole.
    ///
    /// Unsupported types produce a warning notice and leave everything
    /// as it was. Accepted images end any cropping and reset the crop
    /// permission until the new image has been classified.
    pub fn select_image(
        &mut self,
        source: ImageSource,
        notifier: &mut impl Notifier,
    ) -> Option<Submission> {
        let Some(media_type) = source.media_type() else {
            tracing::warn!(
                mime = source.mime_type(),
                filename = source.filename(),
                "rejected image with unsupported type"
            );
            notifier.notify(INVALID_IMAGE_MESSAGE, NoticeKind::Warning);
            return None;
        };
        self.image_id += 1;
        tracing::info!(
            image_id = self.image_id,
            %media_type,
            filename = source.filename(),
            bytes = source.bytes().len(),
            "selected image"
        );
        self.source = Some(source.clone());
        self.cropping = false;
        self.result = None;
        self.result_is_cropped = false;
        self.outcome = Outcome::Pending;
        Some(self.begin_submission(source, false))
    }

    /// Select the first file chosen in the file picker.
    pub fn acquire_from_file_picker(
        &mut self,
        files: impl IntoIterator<Item = ImageSource>,
        notifier: &mut impl Notifier,
    ) -> Option<Submission> {
        self.acquire(Origin::FilePicker, acquire::first_file(files), notifier)
    }

    /// Select the first dropped file.
    pub fn acquire_from_drop(
        &mut self,
        files: impl IntoIterator<Item = ImageSource>,
        notifier: &mut impl Notifier,
    ) -> Option<Submission> {
        self.acquire(Origin::Drop, acquire::first_file(files), notifier)
    }

    /// Select the first pasted item whose type indicates an image.
    pub fn acquire_from_clipboard(
        &mut self,
        items: impl IntoIterator<Item = ImageSource>,
        notifier: &mut impl Notifier,
    ) -> Option<Submission> {
        let picked = acquire::first_image(items, |item| item.mime_type().to_owned());
        self.acquire(Origin::Clipboard, picked, notifier)
    }

    fn acquire(
        &mut self,
        origin: Origin,
        picked: Option<ImageSource>,
        notifier: &mut impl Notifier,
    ) -> Option<Submission> {
        let Some(source) = picked else {
            tracing::debug!(?origin, "nothing to acquire");
            return None;
        };
        tracing::debug!(?origin, "acquired image");
        self.select_image(source, notifier)
    }

    /// Whether [`toggle_cropping`](Self::toggle_cropping) would do anything.
    ///
    /// Leaving the cropper is always allowed; entering it needs a label
    /// for the active image.
    #[must_use]
    pub const fn can_toggle_cropping(&self) -> bool {
        self.cropping || (self.source.is_some() && self.result.is_some())
    }

    /// Switch between the plain preview and the cropper.
    ///
    /// Leaving the cropper after a crop was classified, or while a crop is
    /// still being classified, resubmits the full image so the shown label
    /// matches the shown picture again.
    pub fn toggle_cropping(&mut self) -> Option<Submission> {
        if !self.can_toggle_cropping() {
            tracing::debug!("cropping unavailable without a classification");
            return None;
        }
        self.cropping = !self.cropping;
        tracing::debug!(cropping = self.cropping, "toggled cropping");
        let crop_pending = self.in_flight.is_some_and(|r| r.cropped);
        if self.cropping || !(self.result_is_cropped || crop_pending) {
            return None;
        }
        let source = self.source.clone()?;
        Some(self.begin_submission(source, false))
    }

    /// Rasterize `region` of the active image to JPEG and submit it.
    ///
    /// Does nothing unless the cropper is open, an image is active and a
    /// region exists. The active image is left unchanged so further crops
    /// start from the full picture.
    pub fn apply_crop(&mut self, region: Option<&CropRegion>) -> Option<Submission> {
        if !self.cropping {
            tracing::debug!("apply_crop ignored: not cropping");
            return None;
        }
        let (Some(source), Some(region)) = (self.source.as_ref(), region) else {
            tracing::debug!("apply_crop ignored: no image or region");
            return None;
        };
        let jpeg = match raster::crop_to_jpeg(source.bytes(), region) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                tracing::warn!(error = %e, "crop failed");
                return None;
            }
        };
        let cropped = ImageSource::new(jpeg, MediaType::Jpeg.mime(), source.filename());
        Some(self.begin_submission(cropped, true))
    }

    fn begin_submission(&mut self, source: ImageSource, cropped: bool) -> Submission {
        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            cropped,
        });
        self.result = None;
        tracing::debug!(generation = self.generation, cropped, "submitting");
        Submission {
            generation: self.generation,
            source,
            cropped,
        }
    }

    /// Record the outcome of the request tagged `generation`.
    ///
    /// Returns the new theme after a successful classification. Outcomes
    /// of superseded requests are dropped without any notice.
    pub fn finish(
        &mut self,
        generation: u64,
        outcome: Result<ClassificationResult, ClassifyError>,
        notifier: &mut impl Notifier,
    ) -> Option<Theme> {
        let Some(request) = self.in_flight.filter(|r| r.generation == generation) else {
            tracing::debug!(
                generation,
                latest = self.generation,
                "discarding stale classification"
            );
            return None;
        };
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                tracing::info!(
                    label = %result.predicted_label,
                    confidence = result.confidence,
                    "classified"
                );
                self.theme = Theme::for_label(&result.predicted_label);
                self.result = Some(result);
                self.result_is_cropped = request.cropped;
                self.outcome = Outcome::Classified;
                notifier.notify(SUCCESS_MESSAGE, NoticeKind::Success);
                Some(self.theme)
            }
            Err(e) => {
                tracing::warn!(error = %e, "classification failed");
                self.result = None;
                self.result_is_cropped = false;
                self.outcome = Outcome::Failed;
                notifier.notify(CONNECTIVITY_MESSAGE, NoticeKind::Error);
                None
            }
        }
    }

    /// Release the loading state of a request that will never report back.
    pub fn abandon(&mut self, generation: u64) {
        if self.in_flight.is_some_and(|r| r.generation == generation) {
            tracing::debug!(generation, "request abandoned");
            self.in_flight = None;
            self.outcome = Outcome::Failed;
        }
    }
}
