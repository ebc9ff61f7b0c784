//! Buttons for entering, applying and leaving the cropper.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdCrop};

/// Props for the [`CropControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CropControlsProps {
    /// The cropper is showing.
    cropping: bool,
    /// The toggle may be pressed.
    can_toggle: bool,
    /// Show or hide the cropper.
    on_toggle: EventHandler<()>,
    /// Upload the crop box.
    on_apply: EventHandler<()>,
}

/// "Crop Image" / "Finish Cropping" toggle, plus "Apply Crop" while cropping.
#[component]
pub fn CropControls(props: CropControlsProps) -> Element {
    if !props.can_toggle {
        return rsx! {};
    }
    let label = if props.cropping {
        "Finish Cropping"
    } else {
        "Crop Image"
    };
    rsx! {
        div { class: "crop-controls",
            button {
                class: "btn",
                onclick: move |_| props.on_toggle.call(()),
                Icon { width: 16, height: 16, icon: LdCrop }
                " {label}"
            }
            if props.cropping {
                button {
                    class: "btn btn-accent",
                    onclick: move |_| props.on_apply.call(()),
                    Icon { width: 16, height: 16, icon: LdCheck }
                    " Apply Crop"
                }
            }
        }
    }
}
