use crate::widgets::confirm_dialog::ConfirmDialog;
use crate::widgets::grants_list::GrantsList;
use crate::widgets::member_picker::MemberPickerField;
use crate::widgets::members_list::MembersList;
use crate::widgets::metadata::Metadata;
use crate::widgets::notice_banner::NoticeBanner;
use console::Session;
use console::groups::details::delete_prompt;
use console::groups::{GroupDetails, Loadable, MemberPicker};
use dioxus::prelude::*;
use shared_http::api::{Grant, Group};

/// Detail drawer for the selected group.
///
/// Renders `details` only. The page owning it runs every request, so a change
/// started here still completes after the drawer closes.
#[component]
pub fn GroupPanel(
    details: GroupDetails,
    picker: Signal<MemberPicker>,
    session: Session,
    on_change_privilege: EventHandler<(Grant, String)>,
    on_remove_grant: EventHandler<String>,
    on_add_members: EventHandler<Vec<String>>,
    on_remove_member: EventHandler<String>,
    on_dismiss_notice: EventHandler<()>,
    on_delete: EventHandler<Group>,
    on_close: EventHandler<()>,
) -> Element {
    let mut confirming = use_signal(|| false);
    let can_manage = session.can_manage();

    rsx! {
        aside { class: "group-panel",
            div { class: "panel-header",
                h2 { "{details.group.name}" }
                button {
                    class: "button link",
                    r#type: "button",
                    aria_label: "Close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }

            if let Some(notice) = details.notice.clone() {
                NoticeBanner {
                    key: "{notice.message}",
                    notice,
                    on_dismiss: move |_| on_dismiss_notice.call(()),
                }
            }

            if can_manage {
                section { class: "panel-section",
                    h4 { class: "section-title", "Access" }
                    match details.grants.clone() {
                        Loadable::Loading => rsx! { p { class: "loading", "Loading access..." } },
                        Loadable::Failed(message) => rsx! { p { class: "error-message", "{message}" } },
                        Loadable::Loaded(grants) => rsx! {
                            GrantsList {
                                grants,
                                on_change_privilege,
                                on_remove: on_remove_grant,
                            }
                        },
                    }
                }

                section { class: "panel-section",
                    h4 { class: "section-title", "Users" }
                    MemberPickerField {
                        picker,
                        members: details.member_list().to_vec(),
                        on_add: on_add_members,
                    }
                    match details.members.clone() {
                        Loadable::Loading => rsx! { p { class: "loading", "Loading users..." } },
                        Loadable::Failed(message) => rsx! { p { class: "error-message", "{message}" } },
                        Loadable::Loaded(members) => rsx! {
                            MembersList { members, on_remove: on_remove_member }
                        },
                    }
                }
            }

            Metadata { group: details.group.clone() }

            if can_manage {
                section { class: "panel-section danger-zone",
                    button {
                        class: "button danger",
                        r#type: "button",
                        onclick: move |_| confirming.set(true),
                        "Delete group"
                    }
                }
            }

            if confirming() {
                ConfirmDialog {
                    title: "Delete group".to_string(),
                    message: delete_prompt(&details.group),
                    confirm_label: "Delete".to_string(),
                    on_confirm: {
                        let group = details.group.clone();
                        move |_| {
                            confirming.set(false);
                            on_delete.call(group.clone());
                        }
                    },
                    on_cancel: move |_| confirming.set(false),
                }
            }
        }
    }
}
