use super::list::{Loadable, newest_first};
use crate::api::AccessApi;
use crate::error::{ConsoleError, Result};
use crate::grants::{sort_grants, visible_grants};
use crate::notice::Notice;
use shared_http::api::{
    CreateGrantRequest, Grant, Group, ListGrantsQuery, UpdateUsersInGroupRequest, User,
};
use tracing::{error, info, warn};

/// Result of fetching both sections of the panel for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsLoad {
    pub group_id: String,
    pub grants: Loadable<Vec<Grant>>,
    pub members: Loadable<Vec<User>>,
}

/// Grants of a group, minus reserved ones, in display order.
pub async fn fetch_grants<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> Loadable<Vec<Grant>> {
    let result = api
        .list_grants(&ListGrantsQuery::for_group(group_id))
        .await
        .map(visible_grants);
    if let Err(e) = &result {
        error!("Failed to load grants of {}: {}", group_id, e);
    }
    Loadable::from_result(result)
}

async fn members_of<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> Result<Vec<User>> {
    let mut members = api.list_users(Some(group_id)).await?;
    members.sort_by(|a, b| newest_first(a.created, b.created));
    Ok(members)
}

/// Members of a group, most recently created first.
pub async fn fetch_members<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> Loadable<Vec<User>> {
    let result = members_of(api, group_id).await;
    if let Err(e) = &result {
        error!("Failed to load members of {}: {}", group_id, e);
    }
    Loadable::from_result(result)
}

pub async fn load_details<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> DetailsLoad {
    let (grants, members) = futures::join!(fetch_grants(api, group_id), fetch_members(api, group_id));
    DetailsLoad {
        group_id: group_id.to_string(),
        grants,
        members,
    }
}

pub async fn remove_grant<A: AccessApi + ?Sized>(api: &A, grant_id: &str) -> Result<()> {
    info!("Removing grant {}", grant_id);
    api.delete_grant(grant_id).await
}

/// Outcome of [`change_privilege`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeChange {
    /// The requested privilege is the current one; nothing was sent.
    Unchanged,
    /// `old_id` was replaced by `grant` on the backend.
    Replaced { old_id: String, grant: Grant },
    /// The backend is as it was before the change.
    Failed(ConsoleError),
    /// The backend may hold both grants; `grants` is a fresh fetch.
    Diverged {
        error: ConsoleError,
        grants: Loadable<Vec<Grant>>,
    },
}

/// Replace `grant` with an otherwise identical grant carrying `privilege`.
///
/// Creates the new grant, then deletes the old one. When the delete fails the
/// new grant is deleted again; if that fails too, the group's grants are
/// fetched anew.
pub async fn change_privilege<A: AccessApi + ?Sized>(
    api: &A,
    grant: &Grant,
    privilege: &str,
) -> PrivilegeChange {
    if grant.privilege == privilege {
        return PrivilegeChange::Unchanged;
    }

    info!(
        "Changing privilege of grant {} from {} to {}",
        grant.id, grant.privilege, privilege
    );

    let created = match api
        .create_grant(&CreateGrantRequest::replacing(grant, privilege))
        .await
    {
        Ok(created) => created,
        Err(e) => return PrivilegeChange::Failed(e),
    };

    let error = match api.delete_grant(&grant.id).await {
        Ok(()) => {
            return PrivilegeChange::Replaced {
                old_id: grant.id.clone(),
                grant: created,
            };
        }
        Err(e) => e,
    };

    warn!(
        "Could not delete grant {} after creating {}: {}",
        grant.id, created.id, error
    );
    match api.delete_grant(&created.id).await {
        Ok(()) => PrivilegeChange::Failed(error),
        Err(compensation) => {
            error!(
                "Could not roll back grant {}: {}; reloading grants",
                created.id, compensation
            );
            let grants = match grant.group.as_deref() {
                Some(group_id) => fetch_grants(api, group_id).await,
                None => Loadable::Failed(compensation.to_string()),
            };
            PrivilegeChange::Diverged { error, grants }
        }
    }
}

/// Add the selected users, then fetch the member list again.
pub async fn add_members<A: AccessApi + ?Sized>(
    api: &A,
    group_id: &str,
    user_ids: Vec<String>,
) -> Result<Vec<User>> {
    info!("Adding {} member(s) to group {}", user_ids.len(), group_id);
    api.update_group_users(group_id, &UpdateUsersInGroupRequest::add(user_ids))
        .await?;
    members_of(api, group_id).await
}

pub async fn remove_member<A: AccessApi + ?Sized>(
    api: &A,
    group_id: &str,
    user_id: &str,
) -> Result<()> {
    info!("Removing member {} from group {}", user_id, group_id);
    api.update_group_users(
        group_id,
        &UpdateUsersInGroupRequest::remove(vec![user_id.to_string()]),
    )
    .await
}

/// Question shown before a group is deleted.
pub fn delete_prompt(group: &Group) -> String {
    format!(
        "Are you sure you want to delete {}? This action cannot be undone.",
        group.name
    )
}

/// The detail panel of one group.
///
/// Every `apply_*` method that takes a `group_id` ignores results for a group
/// other than the one currently shown and reports whether it applied them.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDetails {
    pub group: Group,
    pub grants: Loadable<Vec<Grant>>,
    pub members: Loadable<Vec<User>>,
    pub notice: Option<Notice>,
}

impl GroupDetails {
    pub fn new(group: Group) -> Self {
        Self {
            group,
            grants: Loadable::Loading,
            members: Loadable::Loading,
            notice: None,
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group.id
    }

    fn is_current(&self, group_id: &str) -> bool {
        self.group.id == group_id
    }

    /// Switch the panel to another group, discarding everything loaded so far.
    pub fn show(&mut self, group: Group) {
        if self.group.id != group.id {
            *self = Self::new(group);
        } else {
            self.group = group;
        }
    }

    pub fn apply_load(&mut self, load: DetailsLoad) -> bool {
        if !self.is_current(&load.group_id) {
            return false;
        }
        self.grants = load.grants;
        self.members = load.members;
        true
    }

    pub fn apply_grants(&mut self, group_id: &str, grants: Loadable<Vec<Grant>>) -> bool {
        if !self.is_current(group_id) {
            return false;
        }
        self.grants = grants;
        true
    }

    /// "No access" once loaded grants are exhausted.
    pub fn has_no_access(&self) -> bool {
        self.grants.loaded().is_some_and(|grants| grants.is_empty())
    }

    pub fn has_no_members(&self) -> bool {
        self.members.loaded().is_some_and(|members| members.is_empty())
    }

    /// Members already in the group, for excluding them from the picker.
    pub fn member_list(&self) -> &[User] {
        self.members.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn apply_grant_removed(&mut self, group_id: &str, grant_id: &str, result: Result<()>) -> bool {
        if !self.is_current(group_id) {
            return false;
        }
        match result {
            Ok(()) => {
                if let Some(grants) = self.grants.loaded_mut() {
                    grants.retain(|g| g.id != grant_id);
                }
            }
            Err(e) => self.raise("remove the grant", &e),
        }
        true
    }

    /// A replacement whose old grant is no longer listed is dropped; the list
    /// was reloaded since the change started.
    pub fn apply_privilege_change(&mut self, group_id: &str, change: PrivilegeChange) -> bool {
        if !self.is_current(group_id) {
            return false;
        }
        match change {
            PrivilegeChange::Unchanged => {}
            PrivilegeChange::Replaced { old_id, grant } => {
                if let Some(grants) = self.grants.loaded_mut() {
                    if let Some(slot) = grants.iter_mut().find(|g| g.id == old_id) {
                        *slot = grant;
                        sort_grants(grants);
                    }
                }
            }
            PrivilegeChange::Failed(e) => self.raise("change the privilege", &e),
            PrivilegeChange::Diverged { error, grants } => {
                self.raise("change the privilege", &error);
                self.apply_grants(group_id, grants);
            }
        }
        true
    }

    /// Returns true when the picker should be cleared.
    pub fn apply_members_added(&mut self, group_id: &str, result: Result<Vec<User>>) -> bool {
        if !self.is_current(group_id) {
            return false;
        }
        match result {
            Ok(members) => {
                self.members = Loadable::Loaded(members);
                true
            }
            Err(e) => {
                self.raise("add members", &e);
                false
            }
        }
    }

    pub fn apply_member_removed(&mut self, group_id: &str, user_id: &str, result: Result<()>) -> bool {
        if !self.is_current(group_id) {
            return false;
        }
        match result {
            Ok(()) => {
                if let Some(members) = self.members.loaded_mut() {
                    members.retain(|u| u.id != user_id);
                }
            }
            Err(e) => self.raise("remove the member", &e),
        }
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn raise(&mut self, action: &str, err: &ConsoleError) {
        error!("Failed to {}: {}", action, err);
        self.notice = Some(Notice::failed(action, err));
    }
}
