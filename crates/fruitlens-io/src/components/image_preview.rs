//! Plain preview of the selected image.

use dioxus::prelude::*;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    /// Object URL of the image.
    src: String,
}

/// Shows the selected image scaled to fit the drop zone.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    rsx! {
        img {
            src: "{props.src}",
            alt: "Selected",
            class: "image-preview",
        }
    }
}
