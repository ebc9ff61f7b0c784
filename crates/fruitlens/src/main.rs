use dioxus::prelude::*;
use fruitlens_core::{ClientConfig, Mode};
use fruitlens_io::{
    CropControls, Cropper, DropZone, ImagePreview, ResultPanel, Toaster, use_app_state,
    use_paste_images,
};

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting fruitlens");
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the page state and wires the drop zone, cropper, result panel and
/// toaster together. The session's theme is applied as CSS variables on
/// the root element.
fn app() -> Element {
    let state = use_app_state(ClientConfig::from_build_env());
    use_paste_images(state);

    // --- Snapshot for this render ---
    let session = state.session.read();
    let mode = session.mode();
    let theme = session.theme();
    let cropping = session.is_cropping();
    let loading = session.is_loading();
    let can_toggle = session.can_toggle_cropping();
    let result = session.result().cloned();
    drop(session);

    let preview_url = state.previews.read().get().map(|url| url.as_str().to_owned());
    let region = state.cropper.read().region();
    let css_vars = theme.css_vars();

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app", style: "{css_vars}",
            h1 { "Fruit Classification" }

            DropZone {
                on_pick: move |files| state.files_picked(files),
                on_drop: move |files| state.files_dropped(files),
                disabled: cropping,

                {match (preview_url, cropping) {
                    (Some(src), true) => rsx! {
                        Cropper {
                            src,
                            region,
                            on_move: move |(dx, dy)| state.move_crop(dx, dy),
                            on_resize: move |dw| state.resize_crop(dw),
                        }
                    },
                    (Some(src), false) => rsx! {
                        ImagePreview { src }
                    },
                    (None, _) => rsx! {},
                }}
            }

            CropControls {
                cropping,
                can_toggle,
                on_toggle: move |()| state.toggle_cropping(),
                on_apply: move |()| state.apply_crop(),
            }

            if mode == Mode::NoImage {
                p { class: "hint", "Upload an image to get started." }
            }

            ResultPanel { loading, result, theme }

            Toaster { queue: state.notices }
        }
    }
}
