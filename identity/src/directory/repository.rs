use super::error::DirectoryError;
use super::models::{Grant, Group, Identity};
use async_trait::async_trait;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Create a new group
    async fn create(&self, group: Group) -> Result<Group, DirectoryError>;

    /// Find a group by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, DirectoryError>;

    /// Find a group by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DirectoryError>;

    /// List all groups
    async fn list_all(&self) -> Result<Vec<Group>, DirectoryError>;

    /// Delete a group by ID
    async fn delete(&self, id: &str) -> Result<(), DirectoryError>;

    /// Check if a group name exists
    async fn name_exists(&self, name: &str) -> Result<bool, DirectoryError>;
}

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Create a new identity
    async fn create(&self, identity: Identity) -> Result<Identity, DirectoryError>;

    /// Find an identity by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DirectoryError>;

    /// Find an identity by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Identity>, DirectoryError>;

    /// List all identities
    async fn list_all(&self) -> Result<Vec<Identity>, DirectoryError>;

    /// List identities that are members of a group
    async fn list_by_group(&self, group_id: &str) -> Result<Vec<Identity>, DirectoryError>;

    /// Add or remove one group membership against the stored record, so
    /// concurrent changes to other memberships survive. Returns whether
    /// anything changed.
    async fn set_membership(
        &self,
        identity_id: &str,
        group_id: &str,
        member: bool,
    ) -> Result<bool, DirectoryError>;

    /// Check if an identity name exists
    async fn name_exists(&self, name: &str) -> Result<bool, DirectoryError>;
}

#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Create a new grant
    async fn create(&self, grant: Grant) -> Result<Grant, DirectoryError>;

    /// Find a grant by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Grant>, DirectoryError>;

    /// List all grants
    async fn list_all(&self) -> Result<Vec<Grant>, DirectoryError>;

    /// Delete a grant by ID
    async fn delete(&self, id: &str) -> Result<(), DirectoryError>;
}
