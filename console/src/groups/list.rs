use crate::api::AccessApi;
use crate::error::{ConsoleError, Result};
use crate::notice::Notice;
use crate::session::{Session, load_session};
use chrono::{DateTime, Utc};
use shared_http::api::Group;
use std::cmp::Ordering;
use std::fmt;
use tracing::{error, info, warn};

/// A value fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => Loadable::Failed(e.to_string()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

/// Member count of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCount {
    Loading,
    Known(usize),
    Unavailable,
}

impl fmt::Display for MemberCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberCount::Loading => Ok(()),
            MemberCount::Known(1) => f.write_str("1 member"),
            MemberCount::Known(count) => write!(f, "{} members", count),
            MemberCount::Unavailable => f.write_str("--"),
        }
    }
}

/// Count the members of one group. Errors are rendered, never propagated.
pub async fn load_member_count<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> MemberCount {
    match api.list_users(Some(group_id)).await {
        Ok(users) => MemberCount::Known(users.len()),
        Err(e) => {
            warn!("Could not count members of {}: {}", group_id, e);
            MemberCount::Unavailable
        }
    }
}

/// Missing timestamps sort after every known one.
pub(crate) fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub async fn fetch_groups<A: AccessApi + ?Sized>(api: &A) -> Loadable<Vec<Group>> {
    match api.list_groups().await {
        Ok(mut groups) => {
            groups.sort_by(|a, b| newest_first(a.created, b.created));
            Loadable::Loaded(groups)
        }
        Err(e) => {
            error!("Failed to load groups: {}", e);
            Loadable::Failed(e.to_string())
        }
    }
}

pub async fn delete_group<A: AccessApi + ?Sized>(api: &A, group_id: &str) -> Result<()> {
    info!("Deleting group {}", group_id);
    api.delete_group(group_id).await
}

pub async fn create_group<A: AccessApi + ?Sized>(api: &A, name: &str) -> Result<Group> {
    info!("Creating group {}", name);
    api.create_group(name.trim()).await
}

/// The groups page: the collection, the selected row and the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupsView {
    pub groups: Loadable<Vec<Group>>,
    pub selected: Option<String>,
    pub session: Session,
    pub notice: Option<Notice>,
}

impl Default for GroupsView {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupsView {
    pub fn new() -> Self {
        Self {
            groups: Loadable::Loading,
            selected: None,
            session: Session::loading(),
            notice: None,
        }
    }

    /// Fetch the groups and the session capability side by side.
    pub async fn load<A: AccessApi + ?Sized>(api: &A) -> Self {
        let (groups, session) = futures::join!(fetch_groups(api), load_session(api));
        let mut view = Self::new();
        view.apply_groups(groups);
        view.apply_session(session);
        view
    }

    pub fn apply_groups(&mut self, groups: Loadable<Vec<Group>>) {
        if let (Some(selected), Some(loaded)) = (self.selected.as_deref(), groups.loaded()) {
            if !loaded.iter().any(|g| g.id == selected) {
                self.selected = None;
            }
        }
        self.groups = groups;
    }

    pub fn apply_session(&mut self, session: Session) {
        self.session = session;
    }

    /// Empty collection, as opposed to one still loading or failed.
    pub fn is_empty(&self) -> bool {
        self.groups.loaded().is_some_and(|groups| groups.is_empty())
    }

    /// Clicking the selected row again closes it.
    pub fn toggle_selection(&mut self, group_id: &str) {
        if self.selected.as_deref() == Some(group_id) {
            self.selected = None;
        } else {
            self.selected = Some(group_id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_group(&self) -> Option<&Group> {
        let selected = self.selected.as_deref()?;
        self.groups.loaded()?.iter().find(|g| g.id == selected)
    }

    pub fn can_delete(&self) -> bool {
        self.session.can_manage()
    }

    /// Only a confirmed deletion changes the collection.
    pub fn apply_deleted(&mut self, group_id: &str, result: Result<()>) {
        match result {
            Ok(()) => {
                if let Some(groups) = self.groups.loaded_mut() {
                    groups.retain(|g| g.id != group_id);
                }
                self.selected = None;
                self.notice = None;
            }
            Err(e) => self.raise("delete the group", &e),
        }
    }

    /// A new group goes on top and becomes the selection.
    pub fn apply_created(&mut self, result: Result<Group>) {
        match result {
            Ok(group) => {
                self.selected = Some(group.id.clone());
                match self.groups.loaded_mut() {
                    Some(groups) => groups.insert(0, group),
                    None => self.groups = Loadable::Loaded(vec![group]),
                }
                self.notice = None;
            }
            Err(e) => self.raise("create the group", &e),
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn raise(&mut self, action: &str, err: &ConsoleError) {
        error!("Failed to {}: {}", action, err);
        self.notice = Some(Notice::failed(action, err));
    }
}
