use chrono::Utc;
use console::time::created_label;
use dioxus::prelude::*;
use shared_http::api::User;

#[component]
pub fn MembersList(members: Vec<User>, on_remove: EventHandler<String>) -> Element {
    if members.is_empty() {
        return rsx! {
            p { class: "section-empty", "No members in the group" }
        };
    }

    let now = Utc::now();

    rsx! {
        ul { class: "members-list",
            for member in members {
                li { key: "{member.id}", class: "member-row",
                    span { class: "member-name", "{member.name}" }
                    span { class: "member-added", {created_label(member.created, now)} }
                    button {
                        class: "button link",
                        r#type: "button",
                        onclick: {
                            let user_id = member.id.clone();
                            move |_| on_remove.call(user_id.clone())
                        },
                        "Remove"
                    }
                }
            }
        }
    }
}
