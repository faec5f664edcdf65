use super::error::DirectoryError;
use super::models::{GrantFilter, Group, Identity, Subject};
use super::repository::{GrantRepository, GroupRepository, IdentityRepository};
use std::sync::Arc;
use tracing::info;

pub struct GroupService {
    group_repo: Arc<dyn GroupRepository>,
    identity_repo: Arc<dyn IdentityRepository>,
    grant_repo: Arc<dyn GrantRepository>,
}

impl GroupService {
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        identity_repo: Arc<dyn IdentityRepository>,
        grant_repo: Arc<dyn GrantRepository>,
    ) -> Self {
        Self {
            group_repo,
            identity_repo,
            grant_repo,
        }
    }

    /// Create a new group
    pub async fn create_group(&self, name: String) -> Result<Group, DirectoryError> {
        if self.group_repo.name_exists(&name).await? {
            return Err(DirectoryError::GroupAlreadyExists);
        }

        self.group_repo.create(Group::new(name)).await
    }

    /// Get a group by ID
    pub async fn get_group(&self, id: &str) -> Result<Group, DirectoryError> {
        self.group_repo
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::GroupNotFound)
    }

    /// List groups, optionally restricted to an exact name
    pub async fn list_groups(&self, name: Option<&str>) -> Result<Vec<Group>, DirectoryError> {
        match name {
            Some(name) => Ok(self.group_repo.find_by_name(name).await?.into_iter().collect()),
            None => self.group_repo.list_all().await,
        }
    }

    /// Members of a group
    pub async fn members(&self, group_id: &str) -> Result<Vec<Identity>, DirectoryError> {
        self.get_group(group_id).await?;
        self.identity_repo.list_by_group(group_id).await
    }

    /// Delete a group together with its grants and memberships
    pub async fn delete_group(&self, group_id: &str) -> Result<(), DirectoryError> {
        let group = self.get_group(group_id).await?;

        let filter = GrantFilter::for_subject(Subject::Group(group.id.clone()));
        for grant in self.grant_repo.list_all().await? {
            if grant.matches(&filter) {
                self.grant_repo.delete(&grant.id).await?;
            }
        }

        for member in self.identity_repo.list_by_group(&group.id).await? {
            self.identity_repo
                .set_membership(&member.id, &group.id, false)
                .await?;
        }

        self.group_repo.delete(&group.id).await?;
        info!("Deleted group {} ({})", group.name, group.id);
        Ok(())
    }

    /// Add and remove members in one step.
    ///
    /// Every referenced identity must exist; nothing is written otherwise.
    /// Adding an existing member or removing a non-member is a no-op.
    pub async fn update_members(
        &self,
        group_id: &str,
        users_to_add: &[String],
        users_to_remove: &[String],
    ) -> Result<(), DirectoryError> {
        let group = self.get_group(group_id).await?;

        let mut to_add = Vec::with_capacity(users_to_add.len());
        for id in users_to_add {
            to_add.push(self.find_identity(id).await?);
        }
        let mut to_remove = Vec::with_capacity(users_to_remove.len());
        for id in users_to_remove {
            to_remove.push(self.find_identity(id).await?);
        }

        for identity in to_add {
            self.identity_repo
                .set_membership(&identity.id, &group.id, true)
                .await?;
        }
        for identity in to_remove {
            self.identity_repo
                .set_membership(&identity.id, &group.id, false)
                .await?;
        }

        Ok(())
    }

    async fn find_identity(&self, id: &str) -> Result<Identity, DirectoryError> {
        self.identity_repo
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::IdentityNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::models::Grant;
    use crate::directory::sled_repository::{
        SledGrantRepository, SledGroupRepository, SledIdentityRepository,
    };
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        identity_repo: Arc<dyn IdentityRepository>,
        grant_repo: Arc<dyn GrantRepository>,
        group_service: GroupService,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let group_repo = Arc::new(
            SledGroupRepository::new(temp_dir.path().join("groups.sled")).unwrap(),
        ) as Arc<dyn GroupRepository>;
        let identity_repo = Arc::new(
            SledIdentityRepository::new(temp_dir.path().join("identities.sled")).unwrap(),
        ) as Arc<dyn IdentityRepository>;
        let grant_repo = Arc::new(
            SledGrantRepository::new(temp_dir.path().join("grants.sled")).unwrap(),
        ) as Arc<dyn GrantRepository>;

        let group_service =
            GroupService::new(group_repo, identity_repo.clone(), grant_repo.clone());

        Fixture {
            _temp_dir: temp_dir,
            identity_repo,
            grant_repo,
            group_service,
        }
    }

    #[tokio::test]
    async fn test_create_group_rejects_duplicate_name() {
        let fx = fixture();

        fx.group_service
            .create_group("engineering".to_string())
            .await
            .unwrap();
        let result = fx.group_service.create_group("engineering".to_string()).await;

        assert!(matches!(result, Err(DirectoryError::GroupAlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_members() {
        let fx = fixture();
        let group = fx
            .group_service
            .create_group("engineering".to_string())
            .await
            .unwrap();
        let alice = fx
            .identity_repo
            .create(Identity::new("alice@example.com".to_string()))
            .await
            .unwrap();
        let bob = fx
            .identity_repo
            .create(Identity::new("bob@example.com".to_string()))
            .await
            .unwrap();

        fx.group_service
            .update_members(&group.id, &[alice.id.clone(), bob.id.clone()], &[])
            .await
            .unwrap();
        assert_eq!(fx.group_service.members(&group.id).await.unwrap().len(), 2);

        fx.group_service
            .update_members(&group.id, &[], &[bob.id.clone()])
            .await
            .unwrap();
        let members = fx.group_service.members(&group.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, alice.id);
    }

    #[tokio::test]
    async fn test_update_members_with_unknown_identity_writes_nothing() {
        let fx = fixture();
        let group = fx
            .group_service
            .create_group("engineering".to_string())
            .await
            .unwrap();
        let alice = fx
            .identity_repo
            .create(Identity::new("alice@example.com".to_string()))
            .await
            .unwrap();

        let result = fx
            .group_service
            .update_members(&group.id, &[alice.id.clone(), "missing".to_string()], &[])
            .await;

        assert!(matches!(result, Err(DirectoryError::IdentityNotFound)));
        assert!(fx.group_service.members(&group.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_group_cascades() {
        let fx = fixture();
        let group = fx
            .group_service
            .create_group("engineering".to_string())
            .await
            .unwrap();
        let alice = fx
            .identity_repo
            .create(Identity::new("alice@example.com".to_string()))
            .await
            .unwrap();
        fx.group_service
            .update_members(&group.id, &[alice.id.clone()], &[])
            .await
            .unwrap();
        fx.grant_repo
            .create(Grant::new(
                Subject::Group(group.id.clone()),
                "kubernetes.dev".to_string(),
                "view".to_string(),
                None,
            ))
            .await
            .unwrap();
        fx.grant_repo
            .create(Grant::new(
                Subject::Identity(alice.id.clone()),
                "kubernetes.dev".to_string(),
                "edit".to_string(),
                None,
            ))
            .await
            .unwrap();

        fx.group_service.delete_group(&group.id).await.unwrap();

        let grants = fx.grant_repo.list_all().await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].subject, Subject::Identity(alice.id.clone()));

        let alice = fx.identity_repo.find_by_id(&alice.id).await.unwrap().unwrap();
        assert!(alice.group_ids.is_empty());

        let result = fx.group_service.get_group(&group.id).await;
        assert!(matches!(result, Err(DirectoryError::GroupNotFound)));
    }
}
