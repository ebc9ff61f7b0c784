//! Stacked notices in the top-right corner.

use dioxus::prelude::*;
use fruitlens_core::NoticeQueue;

/// Props for the [`Toaster`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ToasterProps {
    /// Notices to show; timers elsewhere remove expired ones.
    queue: Signal<NoticeQueue>,
}

/// Renders every queued notice, newest at the bottom. Clicking a notice
/// closes it.
#[component]
pub fn Toaster(props: ToasterProps) -> Element {
    let mut queue = props.queue;
    let notices: Vec<_> = queue.read().iter().cloned().collect();

    rsx! {
        div { class: "toaster",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: "toast toast-{notice.kind}",
                    role: "status",
                    onclick: move |_| queue.write().dismiss(notice.id),
                    "{notice.message}"
                }
            }
        }
    }
}
