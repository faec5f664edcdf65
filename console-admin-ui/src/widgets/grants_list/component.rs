use console::grants::privilege_options;
use dioxus::prelude::*;
use shared_http::api::Grant;

#[component]
pub fn GrantsList(
    grants: Vec<Grant>,
    on_change_privilege: EventHandler<(Grant, String)>,
    on_remove: EventHandler<String>,
) -> Element {
    if grants.is_empty() {
        return rsx! {
            p { class: "section-empty", "No access" }
        };
    }

    rsx! {
        ul { class: "grants-list",
            for grant in grants {
                li { key: "{grant.id}", class: "grant-row",
                    span { class: "grant-resource", "{grant.resource}" }
                    select {
                        class: "grant-privilege",
                        value: "{grant.privilege}",
                        onchange: {
                            let grant = grant.clone();
                            move |e: FormEvent| on_change_privilege.call((grant.clone(), e.value()))
                        },
                        for option in privilege_options(&grant.privilege) {
                            option {
                                value: "{option}",
                                selected: option == grant.privilege,
                                "{option}"
                            }
                        }
                    }
                    button {
                        class: "button link",
                        r#type: "button",
                        onclick: {
                            let grant_id = grant.id.clone();
                            move |_| on_remove.call(grant_id.clone())
                        },
                        "Remove"
                    }
                }
            }
        }
    }
}
