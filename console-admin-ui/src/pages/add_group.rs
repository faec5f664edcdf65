use crate::Route;
use crate::widgets::notice_banner::NoticeBanner;
use console::groups::list::create_group;
use console::{ApiClient, Notice};
use dioxus::prelude::*;

#[component]
pub fn AddGroup() -> Element {
    let api = use_context::<ApiClient>();
    let mut name = use_signal(String::new);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut submitting = use_signal(|| false);
    let nav = navigator();

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        let api = api.clone();
        let name_val = name();
        submitting.set(true);
        spawn(async move {
            match create_group(&api, &name_val).await {
                Ok(group) => {
                    info!("Created group {}", group.name);
                    nav.push(Route::Groups {});
                }
                Err(e) => {
                    notice.set(Some(Notice::failed("create the group", &e)));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                h1 { "Add group" }
            }

            if let Some(current) = notice() {
                NoticeBanner {
                    key: "{current.message}",
                    notice: current,
                    on_dismiss: move |_| notice.set(None),
                }
            }

            form { class: "add-group-form", onsubmit: on_submit,
                div { class: "form-group",
                    label { r#for: "group-name",
                        "Name"
                        span { class: "required", "*" }
                    }
                    input {
                        id: "group-name",
                        r#type: "text",
                        name: "name",
                        placeholder: "e.g. engineering",
                        maxlength: "256",
                        required: true,
                        value: "{name}",
                        oninput: move |e: FormEvent| name.set(e.value()),
                    }
                }
                div { class: "form-actions",
                    Link { to: Route::Groups {}, class: "button", "Cancel" }
                    button {
                        class: "button primary",
                        r#type: "submit",
                        disabled: submitting() || name().trim().is_empty(),
                        "Add group"
                    }
                }
            }
        }
    }
}
