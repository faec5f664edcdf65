use console::ApiClient;
use console::groups::list::Loadable;
use console::groups::picker::fetch_users;
use console::groups::MemberPicker;
use dioxus::prelude::*;
use shared_http::api::User;

/// Typeahead for choosing users to add. The selection lives in `picker` so the
/// owner can clear it once the backend confirms.
#[component]
pub fn MemberPickerField(
    picker: Signal<MemberPicker>,
    members: Vec<User>,
    on_add: EventHandler<Vec<String>>,
) -> Element {
    let api = use_context::<ApiClient>();
    let users = use_resource(move || {
        let api = api.clone();
        async move { fetch_users(&api).await }
    });

    let state = picker.read().clone();
    let candidates: Vec<User> = match users.read().as_ref() {
        Some(Loadable::Loaded(all)) => state
            .candidates(all, &members)
            .into_iter()
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    rsx! {
        div { class: "member-picker",
            div { class: "picker-input",
                for user in state.selected().iter().cloned() {
                    span { key: "{user.id}", class: "chip",
                        "{user.name}"
                        button {
                            class: "chip-remove",
                            r#type: "button",
                            aria_label: "Remove {user.name}",
                            onclick: move |_| picker.write().deselect(&user.id),
                            "×"
                        }
                    }
                }
                input {
                    r#type: "text",
                    placeholder: "Add users by email",
                    value: "{state.query()}",
                    oninput: move |e: FormEvent| picker.write().set_query(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Backspace {
                            picker.write().backspace();
                        }
                    },
                }
            }
            if let Some(Loadable::Failed(message)) = users.read().as_ref() {
                p { class: "error-message", "Could not load users: {message}" }
            }
            if !candidates.is_empty() {
                ul { class: "picker-options",
                    for user in candidates {
                        li {
                            key: "{user.id}",
                            class: "picker-option",
                            onclick: move |_| picker.write().select(user.clone()),
                            "{user.name}"
                        }
                    }
                }
            }
            button {
                class: "button primary",
                r#type: "button",
                disabled: !state.can_add(),
                onclick: move |_| on_add.call(picker.read().selected_ids()),
                "Add"
            }
        }
    }
}
