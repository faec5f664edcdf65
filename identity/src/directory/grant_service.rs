use super::error::DirectoryError;
use super::models::{Grant, GrantFilter, Subject};
use super::repository::{GrantRepository, GroupRepository, IdentityRepository};
use std::sync::Arc;

pub struct GrantService {
    grant_repo: Arc<dyn GrantRepository>,
    group_repo: Arc<dyn GroupRepository>,
    identity_repo: Arc<dyn IdentityRepository>,
}

impl GrantService {
    pub fn new(
        grant_repo: Arc<dyn GrantRepository>,
        group_repo: Arc<dyn GroupRepository>,
        identity_repo: Arc<dyn IdentityRepository>,
    ) -> Self {
        Self {
            grant_repo,
            group_repo,
            identity_repo,
        }
    }

    /// Create a grant for an existing subject.
    ///
    /// A second grant with the same subject, resource and privilege is rejected.
    pub async fn create_grant(
        &self,
        subject: Subject,
        resource: String,
        privilege: String,
        created_by: Option<String>,
    ) -> Result<Grant, DirectoryError> {
        self.ensure_subject_exists(&subject).await?;

        let filter = GrantFilter::for_subject(subject.clone())
            .resource(resource.clone())
            .privilege(privilege.clone());
        if self.has_grant(&filter).await? {
            return Err(DirectoryError::GrantAlreadyExists);
        }

        self.grant_repo
            .create(Grant::new(subject, resource, privilege, created_by))
            .await
    }

    /// Get a grant by ID
    pub async fn get_grant(&self, id: &str) -> Result<Grant, DirectoryError> {
        self.grant_repo
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::GrantNotFound)
    }

    /// Delete a grant
    pub async fn delete_grant(&self, id: &str) -> Result<(), DirectoryError> {
        self.grant_repo.delete(id).await
    }

    /// List grants matching the filter, oldest first
    pub async fn list_grants(&self, filter: &GrantFilter) -> Result<Vec<Grant>, DirectoryError> {
        let mut grants: Vec<Grant> = self
            .grant_repo
            .list_all()
            .await?
            .into_iter()
            .filter(|grant| grant.matches(filter))
            .collect();
        grants.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(grants)
    }

    pub async fn has_grant(&self, filter: &GrantFilter) -> Result<bool, DirectoryError> {
        Ok(self
            .grant_repo
            .list_all()
            .await?
            .iter()
            .any(|grant| grant.matches(filter)))
    }

    async fn ensure_subject_exists(&self, subject: &Subject) -> Result<(), DirectoryError> {
        match subject {
            Subject::Identity(id) => {
                self.identity_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(DirectoryError::IdentityNotFound)?;
            }
            Subject::Group(id) => {
                self.group_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(DirectoryError::GroupNotFound)?;
            }
        }
        Ok(())
    }
}
