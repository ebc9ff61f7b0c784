//! Drop zone with a file picker and the image preview inside it.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use fruitlens_core::{ImageSource, MediaType};

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Called with the first picked file.
    on_pick: EventHandler<Vec<ImageSource>>,
    /// Called with the first dropped file.
    on_drop: EventHandler<Vec<ImageSource>>,
    /// Disables the picker (while cropping).
    #[props(default)]
    disabled: bool,
    /// Preview or cropper shown inside the zone.
    children: Element,
}

/// Read the first file of a list into an [`ImageSource`].
///
/// The declared MIME type is passed through untouched; validation is the
/// session's job. Unreadable files are logged and skipped.
async fn read_first(files: Vec<FileData>) -> Vec<ImageSource> {
    let Some(file) = files.into_iter().next() else {
        return Vec::new();
    };
    let name = file.name();
    let mime = file.content_type().unwrap_or_default();
    match file.read_bytes().await {
        Ok(bytes) => vec![ImageSource::new(bytes.to_vec(), mime, name)],
        Err(e) => {
            tracing::warn!(error = %e, filename = %name, "failed to read file");
            Vec::new()
        }
    }
}

/// A bordered drop target with a "choose file" input.
///
/// Accepts JPEG, PNG and GIF. The border turns to the accent color while
/// something is dragged over it.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let accept = MediaType::accept_attribute();

    let handle_files = move |evt: FormEvent| async move {
        let sources = read_first(evt.files()).await;
        props.on_pick.call(sources);
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        evt.stop_propagation();
        dragging.set(false);
        let sources = read_first(evt.files()).await;
        props.on_drop.call(sources);
    };

    let zone_class = if dragging() {
        "drop-zone dragging"
    } else {
        "drop-zone"
    };

    rsx! {
        p { "Drag & drop an image below, paste one, or click to select from your device" }
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                dragging.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: "{accept}",
                disabled: props.disabled,
                onchange: handle_files,
            }

            {props.children}
        }
    }
}
