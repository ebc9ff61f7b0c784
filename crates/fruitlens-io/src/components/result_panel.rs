//! Loading indicator and the predicted label.

use dioxus::prelude::*;
use fruitlens_core::{ClassificationResult, Theme};

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// A request is outstanding.
    loading: bool,
    /// The latest classification, if any.
    result: Option<ClassificationResult>,
    /// Colors for the label.
    theme: Theme,
}

/// Shows a spinner while loading, then the label and confidence.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    let accent = props.theme.accent;
    rsx! {
        div { class: "result-panel",
            if props.loading {
                div { class: "loader", aria_label: "Classifying" }
            }
            if let Some(ref result) = props.result {
                div {
                    h2 {
                        "Type of fruit: "
                        span { style: "color: {accent};", "{result.predicted_label}" }
                    }
                    p { "Confidence: {result.confidence_percent()}" }
                }
            }
        }
    }
}
