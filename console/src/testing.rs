use crate::api::AccessApi;
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared_http::api::{
    ADMIN_PRIVILEGE, CreateGrantRequest, Grant, Group, INFRA_RESOURCE, ListGrantsQuery,
    UpdateUsersInGroupRequest, User,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const SELF_ID: &str = "self";

#[derive(Default)]
struct Directory {
    groups: Vec<Group>,
    users: Vec<User>,
    memberships: HashMap<String, Vec<String>>,
    grants: Vec<Grant>,
    next_id: usize,
}

impl Directory {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-memory backend. Operations can be made to fail by name (`"delete_grant"`)
/// or by name and id (`"delete_grant:grant-3"`).
pub struct FakeApi {
    directory: Mutex<Directory>,
    failures: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    epoch: DateTime<Utc>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self {
            directory: Mutex::new(Directory::default()),
            failures: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            epoch: Utc::now() - Duration::days(30),
        };
        api.directory.lock().unwrap().users.push(User {
            id: SELF_ID.to_string(),
            name: "admin@example.com".to_string(),
            created: Some(api.epoch),
            updated: None,
            last_seen_at: None,
        });
        api
    }

    pub fn fail(&self, operation: &str) {
        self.failures.lock().unwrap().insert(operation.to_string());
    }

    pub fn recover(&self, operation: &str) {
        self.failures.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn make_admin(&self) {
        self.insert_grant(Grant {
            id: String::new(),
            user: Some(SELF_ID.to_string()),
            group: None,
            resource: INFRA_RESOURCE.to_string(),
            privilege: ADMIN_PRIVILEGE.to_string(),
            created: None,
        });
    }

    /// Adds a group created `age_hours` after the fake's epoch.
    pub fn add_group(&self, name: &str, age_hours: i64) -> Group {
        let mut directory = self.directory.lock().unwrap();
        let group = Group {
            id: directory.next_id("group"),
            name: name.to_string(),
            created: Some(self.epoch + Duration::hours(age_hours)),
            updated: None,
        };
        directory.groups.push(group.clone());
        group
    }

    pub fn add_user(&self, name: &str, age_hours: i64) -> User {
        let mut directory = self.directory.lock().unwrap();
        let user = User {
            id: directory.next_id("user"),
            name: name.to_string(),
            created: Some(self.epoch + Duration::hours(age_hours)),
            updated: None,
            last_seen_at: None,
        };
        directory.users.push(user.clone());
        user
    }

    pub fn add_member(&self, group_id: &str, user_id: &str) {
        self.directory
            .lock()
            .unwrap()
            .memberships
            .entry(group_id.to_string())
            .or_default()
            .push(user_id.to_string());
    }

    pub fn add_group_grant(&self, group_id: &str, resource: &str, privilege: &str) -> Grant {
        self.insert_grant(Grant {
            id: String::new(),
            user: None,
            group: Some(group_id.to_string()),
            resource: resource.to_string(),
            privilege: privilege.to_string(),
            created: Some(self.epoch),
        })
    }

    pub fn grants(&self) -> Vec<Grant> {
        self.directory.lock().unwrap().grants.clone()
    }

    pub fn members(&self, group_id: &str) -> Vec<String> {
        self.directory
            .lock()
            .unwrap()
            .memberships
            .get(group_id)
            .cloned()
            .unwrap_or_default()
    }

    fn insert_grant(&self, mut grant: Grant) -> Grant {
        let mut directory = self.directory.lock().unwrap();
        grant.id = directory.next_id("grant");
        directory.grants.push(grant.clone());
        grant
    }

    fn check(&self, operation: &str, id: Option<&str>) -> Result<()> {
        self.calls.lock().unwrap().push(match id {
            Some(id) => format!("{}:{}", operation, id),
            None => operation.to_string(),
        });

        let failures = self.failures.lock().unwrap();
        let failing = failures.contains(operation)
            || id.is_some_and(|id| failures.contains(&format!("{}:{}", operation, id)));
        if failing {
            Err(ConsoleError::Api {
                status: 500,
                message: format!("{} failed", operation),
            })
        } else {
            Ok(())
        }
    }
}

fn not_found(what: &str) -> ConsoleError {
    ConsoleError::Api {
        status: 404,
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl AccessApi for FakeApi {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.check("list_groups", None)?;
        Ok(self.directory.lock().unwrap().groups.clone())
    }

    async fn create_group(&self, name: &str) -> Result<Group> {
        self.check("create_group", None)?;
        Ok(self.add_group(name, 24 * 30))
    }

    async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.check("delete_group", Some(group_id))?;
        let mut directory = self.directory.lock().unwrap();
        let before = directory.groups.len();
        directory.groups.retain(|g| g.id != group_id);
        if directory.groups.len() == before {
            return Err(not_found("group"));
        }
        directory.memberships.remove(group_id);
        directory
            .grants
            .retain(|g| g.group.as_deref() != Some(group_id));
        Ok(())
    }

    async fn list_users(&self, group_id: Option<&str>) -> Result<Vec<User>> {
        self.check("list_users", group_id)?;
        let directory = self.directory.lock().unwrap();
        match group_id {
            None => Ok(directory.users.clone()),
            Some(group_id) => {
                if !directory.groups.iter().any(|g| g.id == group_id) {
                    return Err(not_found("group"));
                }
                let members = directory.memberships.get(group_id).cloned().unwrap_or_default();
                Ok(directory
                    .users
                    .iter()
                    .filter(|u| members.contains(&u.id))
                    .cloned()
                    .collect())
            }
        }
    }

    async fn current_user(&self) -> Result<User> {
        self.check("current_user", None)?;
        let directory = self.directory.lock().unwrap();
        directory
            .users
            .iter()
            .find(|u| u.id == SELF_ID)
            .cloned()
            .ok_or_else(|| not_found("user"))
    }

    async fn update_group_users(
        &self,
        group_id: &str,
        patch: &UpdateUsersInGroupRequest,
    ) -> Result<()> {
        self.check("update_group_users", Some(group_id))?;
        let mut directory = self.directory.lock().unwrap();
        let members = directory.memberships.entry(group_id.to_string()).or_default();
        for id in &patch.users_to_add {
            if !members.contains(id) {
                members.push(id.clone());
            }
        }
        members.retain(|id| !patch.users_to_remove.contains(id));
        Ok(())
    }

    async fn list_grants(&self, query: &ListGrantsQuery) -> Result<Vec<Grant>> {
        self.check("list_grants", query.group.as_deref().or(query.user.as_deref()))?;
        let matches = |filter: &Option<String>, value: &Option<String>| {
            filter.is_none() || filter == value
        };
        Ok(self
            .directory
            .lock()
            .unwrap()
            .grants
            .iter()
            .filter(|g| matches(&query.group, &g.group) && matches(&query.user, &g.user))
            .filter(|g| query.resource.as_ref().is_none_or(|r| *r == g.resource))
            .filter(|g| query.privilege.as_ref().is_none_or(|p| *p == g.privilege))
            .cloned()
            .collect())
    }

    async fn create_grant(&self, request: &CreateGrantRequest) -> Result<Grant> {
        self.check("create_grant", None)?;
        Ok(self.insert_grant(Grant {
            id: String::new(),
            user: request.user.clone(),
            group: request.group.clone(),
            resource: request.resource.clone(),
            privilege: request.privilege.clone(),
            created: Some(Utc::now()),
        }))
    }

    async fn delete_grant(&self, grant_id: &str) -> Result<()> {
        self.check("delete_grant", Some(grant_id))?;
        let mut directory = self.directory.lock().unwrap();
        let before = directory.grants.len();
        directory.grants.retain(|g| g.id != grant_id);
        if directory.grants.len() == before {
            Err(not_found("grant"))
        } else {
            Ok(())
        }
    }
}
