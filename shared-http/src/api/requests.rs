use super::models::Grant;
use serde::{Deserialize, Serialize};

/// Request body for creating a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Request body for creating a grant. Exactly one of `user` or `group` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGrantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub privilege: String,
}

impl CreateGrantRequest {
    /// Same subject and resource as `grant`, with a different privilege.
    pub fn replacing(grant: &Grant, privilege: impl Into<String>) -> Self {
        Self {
            user: grant.user.clone(),
            group: grant.group.clone(),
            resource: grant.resource.clone(),
            privilege: privilege.into(),
        }
    }
}

/// Request body for PATCH /api/groups/{id}/users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsersInGroupRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users_to_add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users_to_remove: Vec<String>,
}

impl UpdateUsersInGroupRequest {
    pub fn add(ids: Vec<String>) -> Self {
        Self {
            users_to_add: ids,
            ..Self::default()
        }
    }

    pub fn remove(ids: Vec<String>) -> Self {
        Self {
            users_to_remove: ids,
            ..Self::default()
        }
    }
}

// === Query strings ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListGroupsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGrantsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privilege: Option<String>,
}

impl ListGrantsQuery {
    pub fn for_group(group_id: impl Into<String>) -> Self {
        Self {
            group: Some(group_id.into()),
            ..Self::default()
        }
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privilege = Some(privilege.into());
        self
    }
}
