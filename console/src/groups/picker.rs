use super::list::Loadable;
use crate::api::AccessApi;
use shared_http::api::{CONNECTOR, User};
use tracing::error;

/// Every user, as offered by the picker.
pub async fn fetch_users<A: AccessApi + ?Sized>(api: &A) -> Loadable<Vec<User>> {
    let result = api.list_users(None).await;
    if let Err(e) = &result {
        error!("Failed to load users: {}", e);
    }
    Loadable::from_result(result)
}

/// Typeahead state for adding members to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPicker {
    query: String,
    selected: Vec<User>,
}

impl MemberPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn selected(&self) -> &[User] {
        &self.selected
    }

    /// Users matching the query that are neither selected, already members,
    /// nor the reserved connector account. Input order is preserved.
    pub fn candidates<'a>(&self, users: &'a [User], members: &[User]) -> Vec<&'a User> {
        let query = self.query.to_lowercase();
        users
            .iter()
            .filter(|user| user.name != CONNECTOR)
            .filter(|user| user.name.to_lowercase().contains(&query))
            .filter(|user| !self.selected.iter().any(|s| s.id == user.id))
            .filter(|user| !members.iter().any(|m| m.id == user.id))
            .collect()
    }

    /// Selecting a user clears the query for the next search.
    pub fn select(&mut self, user: User) {
        if !self.selected.iter().any(|s| s.id == user.id) {
            self.selected.push(user);
        }
        self.query.clear();
    }

    pub fn deselect(&mut self, user_id: &str) {
        self.selected.retain(|s| s.id != user_id);
    }

    /// Backspace on an empty query drops the most recent selection.
    /// Returns whether a selection was removed.
    pub fn backspace(&mut self) -> bool {
        if self.query.is_empty() {
            self.selected.pop().is_some()
        } else {
            false
        }
    }

    pub fn can_add(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().map(|u| u.id.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.selected.clear();
    }
}
