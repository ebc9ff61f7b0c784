//! Shared application state and the submit path.
//!
//! [`AppState`] bundles the signals every component needs and runs the
//! session's [`Submission`]s against the prediction endpoint. While a
//! request is outstanding an [`InFlight`] guard holds its generation; if
//! the task is dropped before answering, the guard tells the session to
//! stop showing the loading indicator.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use fruitlens_core::{
    ClassificationResult, ClassifyError, ClientConfig, CropAdapter, ImageSource, NoticeQueue,
    PreviewSlot, Session, Submission, raster,
};

use crate::client::PredictClient;
use crate::clipboard::{PasteListener, read_file};
use crate::notices::ToastNotifier;
use crate::preview::BlobUrl;

/// Signals shared by the whole page. Cheap to copy.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The state machine.
    pub session: Signal<Session>,
    /// Crop box for the image in the cropper.
    pub cropper: Signal<CropAdapter>,
    /// Preview URL of the active image.
    pub previews: Signal<PreviewSlot<BlobUrl>>,
    /// Notices on screen.
    pub notices: Signal<NoticeQueue>,
    client: Signal<Rc<PredictClient>>,
}

/// Create the page state. Call once from the root component.
pub fn use_app_state(config: ClientConfig) -> AppState {
    let ttl = config.notice_ttl();
    let session = use_signal(Session::new);
    let cropper = use_signal(CropAdapter::new);
    let previews = use_signal(PreviewSlot::<BlobUrl>::new);
    let notices = use_signal(|| NoticeQueue::new(ttl));
    let client = use_signal(move || Rc::new(PredictClient::new(config)));
    AppState {
        session,
        cropper,
        previews,
        notices,
        client,
    }
}

/// Route images pasted anywhere on the page into `state`.
///
/// The window listener is registered on first render and removed when
/// the calling component unmounts.
pub fn use_paste_images(state: AppState) {
    let paste = use_coroutine(move |mut rx: UnboundedReceiver<web_sys::File>| async move {
        while let Some(file) = rx.next().await {
            match read_file(&file).await {
                Ok(source) => state.pasted(vec![source]),
                Err(e) => tracing::warn!(error = %e, "failed to read pasted image"),
            }
        }
    });

    let listener = use_hook(move || {
        let listener = PasteListener::new(move |file| paste.send(file))
            .map_err(|e| tracing::warn!(error = %e, "paste support unavailable"))
            .ok();
        Rc::new(RefCell::new(listener))
    });
    use_drop(move || {
        listener.borrow_mut().take();
    });
}

impl AppState {
    /// A notifier writing into this page's toaster.
    #[must_use]
    pub const fn notifier(&self) -> ToastNotifier {
        ToastNotifier::new(self.notices)
    }

    /// Handle files from the picker.
    pub fn files_picked(mut self, files: Vec<ImageSource>) {
        let mut notifier = self.notifier();
        let submission = self
            .session
            .write()
            .acquire_from_file_picker(files, &mut notifier);
        self.start(submission);
    }

    /// Handle files dropped on the drop zone.
    pub fn files_dropped(mut self, files: Vec<ImageSource>) {
        let mut notifier = self.notifier();
        let submission = self.session.write().acquire_from_drop(files, &mut notifier);
        self.start(submission);
    }

    /// Handle a pasted image.
    pub fn pasted(mut self, items: Vec<ImageSource>) {
        let mut notifier = self.notifier();
        let submission = self
            .session
            .write()
            .acquire_from_clipboard(items, &mut notifier);
        self.start(submission);
    }

    /// Show or hide the cropper.
    pub fn toggle_cropping(mut self) {
        let submission = self.session.write().toggle_cropping();
        let session = self.session.peek();
        if session.is_cropping()
            && let Some(source) = session.source()
        {
            match raster::dimensions(source.bytes()) {
                Ok(natural) => {
                    self.cropper.write().image_loaded(session.image_id(), natural);
                }
                Err(e) => tracing::warn!(error = %e, "cannot read image size for cropping"),
            }
        }
        drop(session);
        if let Some(submission) = submission {
            self.dispatch(submission);
        }
    }

    /// Drag the crop box by a percent offset.
    pub fn move_crop(mut self, dx_percent: f64, dy_percent: f64) {
        self.cropper.write().move_by(dx_percent, dy_percent);
    }

    /// Resize the crop box by a percent of the image width.
    pub fn resize_crop(mut self, dw_percent: f64) {
        self.cropper.write().resize_by(dw_percent);
    }

    /// Upload the current crop box.
    pub fn apply_crop(mut self) {
        let region = self.cropper.peek().region();
        let submission = self.session.write().apply_crop(region.as_ref());
        if let Some(submission) = submission {
            self.dispatch(submission);
        }
    }

    /// Preview a newly selected image and upload it.
    fn start(&mut self, submission: Option<Submission>) {
        let Some(submission) = submission else {
            return;
        };
        let image_id = self.session.peek().image_id();
        match BlobUrl::from_source(submission.source()) {
            Ok(url) => self.previews.write().replace(image_id, url),
            Err(e) => {
                tracing::warn!(error = %e, "preview unavailable");
                self.previews.write().clear();
            }
        }
        self.cropper.write().reset();
        self.dispatch(submission);
    }

    /// Send a submission and report its outcome to the session.
    fn dispatch(&self, submission: Submission) {
        let client = Rc::clone(&self.client.peek());
        let guard = InFlight {
            session: self.session,
            generation: submission.generation(),
            notifier: self.notifier(),
            settled: false,
        };
        spawn(async move {
            let outcome = client.classify(submission.source()).await;
            guard.settle(outcome);
        });
    }
}

/// Scoped ownership of one outstanding request.
///
/// Settling reports the outcome; dropping without settling abandons the
/// request so the loading flag is released on every path.
struct InFlight {
    session: Signal<Session>,
    generation: u64,
    notifier: ToastNotifier,
    settled: bool,
}

impl InFlight {
    fn settle(mut self, outcome: Result<ClassificationResult, ClassifyError>) {
        self.settled = true;
        let mut notifier = self.notifier;
        if let Ok(mut session) = self.session.try_write() {
            session.finish(self.generation, outcome, &mut notifier);
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut session) = self.session.try_write() {
            session.abandon(self.generation);
        }
    }
}
