#[cfg(not(target_arch = "wasm32"))]
use identity::directory::{models as directory, Subject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved resource name. Grants on it control access to the directory itself
/// and are never listed next to ordinary resources.
pub const INFRA_RESOURCE: &str = "infra";
/// Reserved system account that must never be offered as a group member.
pub const CONNECTOR: &str = "connector";
pub const CLUSTER_ADMIN: &str = "cluster-admin";
pub const ADMIN_PRIVILEGE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// A privilege on a resource, held by exactly one of `user` or `group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub privilege: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Grant {
    /// The user id if set, otherwise the group id. Empty ids count as unset.
    pub fn subject(&self) -> Option<&str> {
        fn present(id: &Option<String>) -> Option<&str> {
            id.as_deref().filter(|s| !s.is_empty())
        }
        present(&self.user).or_else(|| present(&self.group))
    }

    pub fn is_reserved(&self) -> bool {
        self.resource == INFRA_RESOURCE
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<directory::Group> for Group {
    fn from(group: directory::Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            created: Some(group.created_at),
            updated: Some(group.updated_at),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<directory::Identity> for User {
    fn from(identity: directory::Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            created: Some(identity.created_at),
            updated: Some(identity.updated_at),
            last_seen_at: identity.last_seen_at,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<directory::Grant> for Grant {
    fn from(grant: directory::Grant) -> Self {
        let (user, group) = match grant.subject {
            Subject::Identity(id) => (Some(id), None),
            Subject::Group(id) => (None, Some(id)),
        };
        Self {
            id: grant.id,
            user,
            group,
            resource: grant.resource,
            privilege: grant.privilege,
            created: Some(grant.created_at),
        }
    }
}
