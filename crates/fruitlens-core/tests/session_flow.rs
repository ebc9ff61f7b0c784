//! Integration test: drive a session through select → classify → crop →
//! reselect, holding previews the way the browser front-end does.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use fruitlens_core::{
    ClassificationResult, ClassifyError, CropAdapter, ImageSource, Mode, NoticeKind, PreviewSlot,
    ReleasePreview, Session, Theme, raster,
};

/// Stand-in for a Blob URL: counts how many times each one is revoked.
struct FakeUrl {
    id: u64,
    revoked: Rc<RefCell<Vec<u64>>>,
}

impl ReleasePreview for FakeUrl {
    fn release(&mut self) {
        self.revoked.borrow_mut().push(self.id);
    }
}

fn jpeg_source(name: &str, width: u32, height: u32) -> ImageSource {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([250, 220, 40]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    ImageSource::new(buf, "image/jpeg", name)
}

fn label(name: &str) -> ClassificationResult {
    ClassificationResult {
        predicted_label: name.into(),
        confidence: 0.87,
    }
}

#[test]
fn rapid_reselection_keeps_one_preview_and_ignores_stale_answers() {
    let revoked = Rc::new(RefCell::new(Vec::new()));
    let mut notices: Vec<(String, NoticeKind)> = Vec::new();
    let mut session = Session::new();

    {
        let mut previews = PreviewSlot::new();

        let a = session
            .acquire_from_file_picker([jpeg_source("a.jpg", 400, 300)], &mut notices)
            .expect("jpeg accepted");
        previews.replace(
            session.image_id(),
            FakeUrl {
                id: session.image_id(),
                revoked: Rc::clone(&revoked),
            },
        );

        let b = session
            .acquire_from_drop([jpeg_source("b.jpg", 400, 300)], &mut notices)
            .expect("jpeg accepted");
        previews.replace(
            session.image_id(),
            FakeUrl {
                id: session.image_id(),
                revoked: Rc::clone(&revoked),
            },
        );

        assert_eq!(*revoked.borrow(), [1], "a's preview released when b arrived");
        assert_eq!(previews.image_id(), Some(2));

        // A's answer arrives late and must not leak onto b.
        assert_eq!(session.finish(a.generation(), Ok(label("apple")), &mut notices), None);
        assert!(session.toggle_cropping().is_none());
        assert!(!session.is_cropping(), "no result for b yet");

        let theme = session.finish(b.generation(), Ok(label("banana")), &mut notices);
        assert_eq!(theme, Some(Theme::for_label("banana")));
        assert_eq!(session.mode(), Mode::Result);
    }

    assert_eq!(*revoked.borrow(), [1, 2], "teardown released b exactly once");
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].1, NoticeKind::Success);
}

#[test]
fn crop_round_trip_uploads_initial_region() {
    let mut notices: Vec<(String, NoticeKind)> = Vec::new();
    let mut session = Session::new();
    let mut cropper = CropAdapter::new();

    let first = session
        .select_image(jpeg_source("fruit.jpg", 600, 400), &mut notices)
        .unwrap();
    session.finish(first.generation(), Ok(label("lemon")), &mut notices);
    let _ = session.toggle_cropping();
    assert_eq!(session.mode(), Mode::Cropping);

    let natural = raster::dimensions(session.source().unwrap().bytes()).unwrap();
    cropper.image_loaded(session.image_id(), natural);

    let crop = session.apply_crop(cropper.region().as_ref()).unwrap();
    let cropped_size = raster::dimensions(crop.source().bytes()).unwrap();
    assert_eq!((cropped_size.width, cropped_size.height), (150, 150));
    assert_eq!(session.mode(), Mode::Submitting);

    session.finish(
        crop.generation(),
        Err(ClassifyError::Transport("connection refused".into())),
        &mut notices,
    );
    assert_eq!(session.mode(), Mode::Cropping, "still in the cropper after failure");
    assert!(session.result().is_none());
    assert_eq!(
        notices.last().map(|(_, kind)| *kind),
        Some(NoticeKind::Error)
    );

    // Leaving the cropper is always possible, re-entering needs a label.
    assert!(session.toggle_cropping().is_none());
    assert_eq!(session.mode(), Mode::Failed);
    assert!(!session.can_toggle_cropping());
}
