pub mod client;

pub use client::ApiClient;

use crate::error::Result;
use async_trait::async_trait;
use shared_http::api::{
    CreateGrantRequest, Grant, Group, ListGrantsQuery, UpdateUsersInGroupRequest, User,
};

/// The backend operations the console depends on.
///
/// [`ApiClient`] talks to the REST API; tests substitute an in-memory fake.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AccessApi {
    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn create_group(&self, name: &str) -> Result<Group>;

    async fn delete_group(&self, group_id: &str) -> Result<()>;

    /// All users, or only the members of `group_id`
    async fn list_users(&self, group_id: Option<&str>) -> Result<Vec<User>>;

    /// The identity the backend attributes requests to
    async fn current_user(&self) -> Result<User>;

    async fn update_group_users(
        &self,
        group_id: &str,
        patch: &UpdateUsersInGroupRequest,
    ) -> Result<()>;

    async fn list_grants(&self, query: &ListGrantsQuery) -> Result<Vec<Grant>>;

    async fn create_grant(&self, request: &CreateGrantRequest) -> Result<Grant>;

    async fn delete_grant(&self, grant_id: &str) -> Result<()>;
}
