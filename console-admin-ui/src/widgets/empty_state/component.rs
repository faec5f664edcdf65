use dioxus::prelude::*;

/// Placeholder shown instead of an empty table, with an optional call to action.
#[component]
pub fn EmptyState(
    illustration: Asset,
    title: String,
    description: String,
    action_label: Option<String>,
    on_action: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "empty-state",
            img { class: "empty-illustration", src: illustration, alt: "" }
            h3 { class: "empty-title", "{title}" }
            p { class: "empty-description", "{description}" }
            if let Some(label) = action_label {
                button {
                    class: "button primary",
                    r#type: "button",
                    onclick: move |_| on_action.call(()),
                    "{label}"
                }
            }
        }
    }
}
