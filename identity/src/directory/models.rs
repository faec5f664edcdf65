use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user account. Membership is stored on the identity as a list of group ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub group_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            group_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            last_seen_at: None,
        }
    }

    pub fn is_member_of(&self, group_id: &str) -> bool {
        self.group_ids.iter().any(|g| g == group_id)
    }

    /// Returns true when the membership changed.
    pub fn join(&mut self, group_id: &str) -> bool {
        if self.is_member_of(group_id) {
            return false;
        }
        self.group_ids.push(group_id.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Returns true when the membership changed.
    pub fn leave(&mut self, group_id: &str) -> bool {
        let before = self.group_ids.len();
        self.group_ids.retain(|g| g != group_id);
        let changed = self.group_ids.len() != before;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Who a grant applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    Identity(String),
    Group(String),
}

impl Subject {
    pub fn id(&self) -> &str {
        match self {
            Subject::Identity(id) | Subject::Group(id) => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grant {
    pub id: String,
    pub subject: Subject,
    pub resource: String,
    pub privilege: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl Grant {
    pub fn new(
        subject: Subject,
        resource: String,
        privilege: String,
        created_by: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            resource,
            privilege,
            created_at: Utc::now(),
            created_by,
        }
    }

    pub fn matches(&self, filter: &GrantFilter) -> bool {
        filter.subject.as_ref().is_none_or(|s| *s == self.subject)
            && filter.resource.as_ref().is_none_or(|r| *r == self.resource)
            && filter
                .privilege
                .as_ref()
                .is_none_or(|p| *p == self.privilege)
    }
}

/// Optional constraints for listing grants. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantFilter {
    pub subject: Option<Subject>,
    pub resource: Option<String>,
    pub privilege: Option<String>,
}

impl GrantFilter {
    pub fn for_subject(subject: Subject) -> Self {
        Self {
            subject: Some(subject),
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
