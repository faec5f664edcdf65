use crate::Route;
use crate::widgets::empty_state::EmptyState;
use crate::widgets::group_panel::GroupPanel;
use crate::widgets::member_count::MemberCountCell;
use crate::widgets::notice_banner::NoticeBanner;
use console::ApiClient;
use console::groups::details::{
    add_members, change_privilege, load_details, remove_grant, remove_member,
};
use console::groups::list::delete_group;
use console::groups::{GroupDetails, GroupsView, Loadable, MemberPicker};
use dioxus::prelude::*;
use shared_http::api::{Grant, Group};

const GROUPS_SVG: Asset = asset!("/assets/groups.svg");

/// Id of the group the drawer currently shows.
fn shown_group(details: Signal<Option<GroupDetails>>) -> Option<String> {
    details.read().as_ref().map(|d| d.group_id().to_string())
}

#[component]
pub fn Groups() -> Element {
    let api = use_context::<ApiClient>();
    let mut view = use_signal(GroupsView::new);
    // Drawer state lives here, and so do its requests: they outlive the drawer.
    let mut details = use_signal(|| None::<GroupDetails>);
    let mut picker = use_signal(MemberPicker::new);
    let nav = navigator();

    let load_api = api.clone();
    use_hook(move || {
        spawn(async move {
            let loaded = GroupsView::load(&load_api).await;
            view.set(loaded);
        })
    });

    // Copy, so every row can share it.
    let select_api = api.clone();
    let on_select = EventHandler::new(move |id: String| {
        view.write().toggle_selection(&id);
        picker.write().clear();
        let selected = view.read().selected_group().cloned();
        let Some(group) = selected else {
            details.set(None);
            return;
        };

        let group_id = group.id.clone();
        let mut shown = details.write();
        match shown.as_mut() {
            Some(panel) => panel.show(group),
            None => *shown = Some(GroupDetails::new(group)),
        }
        drop(shown);

        let api = select_api.clone();
        spawn(async move {
            let load = load_details(&api, &group_id).await;
            if let Some(panel) = details.write().as_mut() {
                panel.apply_load(load);
            }
        });
    });

    let on_close = move |_: ()| {
        view.write().clear_selection();
        details.set(None);
        picker.write().clear();
    };

    let delete_api = api.clone();
    let on_delete = move |group: Group| {
        let api = delete_api.clone();
        spawn(async move {
            let result = delete_group(&api, &group.id).await;
            view.write().apply_deleted(&group.id, result);
            if view.read().selected.is_none() {
                details.set(None);
            }
        });
    };

    let change_api = api.clone();
    let on_change_privilege = move |(grant, privilege): (Grant, String)| {
        let Some(group_id) = shown_group(details) else {
            return;
        };
        let api = change_api.clone();
        spawn(async move {
            let change = change_privilege(&api, &grant, &privilege).await;
            if let Some(panel) = details.write().as_mut() {
                panel.apply_privilege_change(&group_id, change);
            }
        });
    };

    let remove_grant_api = api.clone();
    let on_remove_grant = move |grant_id: String| {
        let Some(group_id) = shown_group(details) else {
            return;
        };
        let api = remove_grant_api.clone();
        spawn(async move {
            let result = remove_grant(&api, &grant_id).await;
            if let Some(panel) = details.write().as_mut() {
                panel.apply_grant_removed(&group_id, &grant_id, result);
            }
        });
    };

    let add_api = api.clone();
    let on_add_members = move |user_ids: Vec<String>| {
        let Some(group_id) = shown_group(details) else {
            return;
        };
        let api = add_api.clone();
        spawn(async move {
            let result = add_members(&api, &group_id, user_ids).await;
            let applied = details
                .write()
                .as_mut()
                .is_some_and(|panel| panel.apply_members_added(&group_id, result));
            if applied {
                picker.write().clear();
            }
        });
    };

    let remove_member_api = api.clone();
    let on_remove_member = move |user_id: String| {
        let Some(group_id) = shown_group(details) else {
            return;
        };
        let api = remove_member_api.clone();
        spawn(async move {
            let result = remove_member(&api, &group_id, &user_id).await;
            if let Some(panel) = details.write().as_mut() {
                panel.apply_member_removed(&group_id, &user_id, result);
            }
        });
    };

    let snapshot = view.read().clone();
    let shown_details = details.read().clone();
    let can_manage = snapshot.session.can_manage();

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                h1 { "Groups" }
                if can_manage {
                    Link { to: Route::AddGroup {}, class: "button primary", "Add group" }
                }
            }

            if let Some(notice) = snapshot.notice.clone() {
                NoticeBanner {
                    key: "{notice.message}",
                    notice,
                    on_dismiss: move |_| view.write().dismiss_notice(),
                }
            }

            div { class: "page-content",
                match snapshot.groups.clone() {
                    Loadable::Loading => rsx! {
                        div { class: "loading", "Loading groups..." }
                    },
                    Loadable::Failed(message) => rsx! {
                        div { class: "error-message", "Could not load groups: {message}" }
                    },
                    Loadable::Loaded(groups) if groups.is_empty() => rsx! {
                        EmptyState {
                            illustration: GROUPS_SVG,
                            title: "No groups".to_string(),
                            description: "Groups let you grant access to many users at once. Add a group, then add users and grants to it.".to_string(),
                            action_label: can_manage.then(|| "Add group".to_string()),
                            on_action: move |_| {
                                nav.push(Route::AddGroup {});
                            },
                        }
                    },
                    Loadable::Loaded(groups) => rsx! {
                        table { class: "groups-table",
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Users" }
                                }
                            }
                            tbody {
                                for group in groups {
                                    GroupRow {
                                        key: "{group.id}",
                                        selected: snapshot.selected.as_deref() == Some(group.id.as_str()),
                                        group,
                                        on_select,
                                    }
                                }
                            }
                        }
                    },
                }
            }

            if let Some(shown) = shown_details {
                GroupPanel {
                    key: "{shown.group.id}",
                    details: shown,
                    picker,
                    session: snapshot.session,
                    on_change_privilege,
                    on_remove_grant,
                    on_add_members,
                    on_remove_member,
                    on_dismiss_notice: move |_| {
                        if let Some(panel) = details.write().as_mut() {
                            panel.dismiss_notice();
                        }
                    },
                    on_delete,
                    on_close,
                }
            }
        }
    }
}

#[component]
fn GroupRow(group: Group, selected: bool, on_select: EventHandler<String>) -> Element {
    rsx! {
        tr {
            class: if selected { "group-row selected" } else { "group-row" },
            onclick: {
                let id = group.id.clone();
                move |_| on_select.call(id.clone())
            },
            td { class: "group-name", "{group.name}" }
            td { MemberCountCell { group_id: group.id.clone() } }
        }
    }
}
