use super::error::DirectoryError;
use super::models::Identity;
use super::repository::IdentityRepository;
use std::sync::Arc;

pub struct IdentityService {
    identity_repo: Arc<dyn IdentityRepository>,
}

impl IdentityService {
    pub fn new(identity_repo: Arc<dyn IdentityRepository>) -> Self {
        Self { identity_repo }
    }

    /// Create a new identity
    pub async fn create_identity(&self, name: String) -> Result<Identity, DirectoryError> {
        self.identity_repo.create(Identity::new(name)).await
    }

    /// Get an identity by ID
    pub async fn get_identity(&self, id: &str) -> Result<Identity, DirectoryError> {
        self.identity_repo
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::IdentityNotFound)
    }

    /// Get an identity by name
    pub async fn get_identity_by_name(&self, name: &str) -> Result<Identity, DirectoryError> {
        self.identity_repo
            .find_by_name(name)
            .await?
            .ok_or(DirectoryError::IdentityNotFound)
    }

    /// Return the identity with this name, creating it when it does not exist yet
    pub async fn ensure_identity(&self, name: &str) -> Result<Identity, DirectoryError> {
        match self.identity_repo.find_by_name(name).await? {
            Some(identity) => Ok(identity),
            None => self.create_identity(name.to_string()).await,
        }
    }

    /// List identities, optionally restricted to one group and/or an exact name
    pub async fn list_identities(
        &self,
        group_id: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Identity>, DirectoryError> {
        let identities = match group_id {
            Some(group_id) => self.identity_repo.list_by_group(group_id).await?,
            None => self.identity_repo.list_all().await?,
        };

        Ok(identities
            .into_iter()
            .filter(|identity| name.is_none_or(|n| identity.name == n))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::sled_repository::SledIdentityRepository;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> IdentityService {
        let identity_repo = Arc::new(
            SledIdentityRepository::new(temp_dir.path().join("identities.sled")).unwrap(),
        ) as Arc<dyn IdentityRepository>;
        IdentityService::new(identity_repo)
    }

    #[tokio::test]
    async fn test_ensure_identity_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir);

        let first = identity_service
            .ensure_identity("admin@example.com")
            .await
            .unwrap();
        let second = identity_service
            .ensure_identity("admin@example.com")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(identity_service.list_identities(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_identities_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir);

        identity_service
            .create_identity("alice@example.com".to_string())
            .await
            .unwrap();
        identity_service
            .create_identity("bob@example.com".to_string())
            .await
            .unwrap();

        let found = identity_service
            .list_identities(None, Some("bob@example.com"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "bob@example.com");
    }

    #[tokio::test]
    async fn test_get_missing_identity() {
        let temp_dir = TempDir::new().unwrap();
        let identity_service = service(&temp_dir);

        let result = identity_service.get_identity("missing").await;
        assert!(matches!(result, Err(DirectoryError::IdentityNotFound)));
    }
}
