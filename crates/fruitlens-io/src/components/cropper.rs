//! Square crop box over the selected image.
//!
//! The box is positioned in percent of the image, so it tracks the image
//! however the browser scales it. Pointer drags are converted from screen
//! pixels to percent using the rendered size of the image container and
//! reported to the parent, which applies them to the
//! [`CropAdapter`](fruitlens_core::CropAdapter) (where the aspect lock,
//! minimum size and bounds are enforced).

use std::rc::Rc;

use dioxus::prelude::*;
use fruitlens_core::CropRegion;

/// Props for the [`Cropper`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CropperProps {
    /// Object URL of the image.
    src: String,
    /// Current crop box in percent units.
    region: Option<CropRegion>,
    /// Drag of the box body, as `(dx, dy)` in percent of the image.
    on_move: EventHandler<(f64, f64)>,
    /// Drag of the resize handle, as a width change in percent of the image.
    on_resize: EventHandler<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragKind {
    Move,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    kind: DragKind,
    last_x: f64,
    last_y: f64,
}

/// The image with a draggable, resizable crop box on top.
#[component]
pub fn Cropper(props: CropperProps) -> Element {
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut displayed = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag = use_signal(|| Option::<Drag>::None);

    // Re-measure the rendered image; it can change with layout.
    let measure = move || {
        let Some(el) = container.peek().clone() else {
            return;
        };
        spawn(async move {
            match el.get_client_rect().await {
                Ok(rect) => displayed.set((rect.size.width, rect.size.height)),
                Err(e) => tracing::debug!(error = ?e, "could not measure cropper"),
            }
        });
    };

    let mut start_drag = move |kind: DragKind, evt: &PointerEvent| {
        let p = evt.client_coordinates();
        drag.set(Some(Drag {
            kind,
            last_x: p.x,
            last_y: p.y,
        }));
        measure();
    };

    let on_pointer_move = move |evt: PointerEvent| {
        let Some(current) = drag() else {
            return;
        };
        let (w, h) = displayed();
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let p = evt.client_coordinates();
        let dx = (p.x - current.last_x) / w * 100.0;
        let dy = (p.y - current.last_y) / h * 100.0;
        drag.set(Some(Drag {
            last_x: p.x,
            last_y: p.y,
            ..current
        }));
        match current.kind {
            DragKind::Move => props.on_move.call((dx, dy)),
            DragKind::Resize => props.on_resize.call(dx),
        }
    };

    let box_style = props.region.map(|r| {
        format!(
            "left: {:.4}%; top: {:.4}%; width: {:.4}%; height: {:.4}%;",
            r.x, r.y, r.width, r.height
        )
    });

    rsx! {
        div {
            class: "cropper",
            onmounted: move |evt: MountedEvent| {
                container.set(Some(evt.data()));
                measure();
            },
            onpointermove: on_pointer_move,
            onpointerup: move |_| drag.set(None),
            onpointerleave: move |_| drag.set(None),

            img {
                src: "{props.src}",
                alt: "Selected",
                class: "cropper-image",
                draggable: "false",
                onload: move |_| measure(),
            }

            if let Some(style) = box_style {
                div {
                    class: "crop-box",
                    style: "{style}",
                    onpointerdown: move |evt: PointerEvent| {
                        evt.prevent_default();
                        start_drag(DragKind::Move, &evt);
                    },

                    div {
                        class: "crop-handle",
                        onpointerdown: move |evt: PointerEvent| {
                            evt.prevent_default();
                            evt.stop_propagation();
                            start_drag(DragKind::Resize, &evt);
                        },
                    }
                }
            }
        }
    }
}
