use chrono::Utc;
use console::time::created_label;
use dioxus::prelude::*;
use shared_http::api::Group;

#[component]
pub fn Metadata(group: Group) -> Element {
    let created = created_label(group.created, Utc::now());

    rsx! {
        section { class: "panel-section metadata",
            h4 { class: "section-title", "Metadata" }
            dl {
                dt { "ID" }
                dd { class: "mono", "{group.id}" }
                dt { "Created" }
                dd { "{created}" }
            }
        }
    }
}
