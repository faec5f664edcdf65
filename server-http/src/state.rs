use identity::directory::defaults::{self, DemoSeed};
use identity::directory::{
    GrantRepository, GrantService, GroupRepository, GroupService, Identity, IdentityRepository,
    IdentityService, SledGrantRepository, SledGroupRepository, SledIdentityRepository,
};
use std::path::Path;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<GroupService>,
    pub identity_service: Arc<IdentityService>,
    pub grant_service: Arc<GrantService>,
    /// Name of the identity every request is attributed to
    pub self_identity: String,
}

impl AppState {
    /// Open (or create) the sled-backed directory under `base_path`
    pub fn open<P: AsRef<Path>>(base_path: P, self_identity: impl Into<String>) -> shared::Result<Self> {
        let base_path = base_path.as_ref();
        std::fs::create_dir_all(base_path).map_err(|e| {
            shared::Error::Storage(format!("cannot create {}: {}", base_path.display(), e))
        })?;

        let storage = |e: identity::DirectoryError| shared::Error::Storage(e.to_string());

        let group_repo = Arc::new(
            SledGroupRepository::new(base_path.join("groups.sled")).map_err(storage)?,
        ) as Arc<dyn GroupRepository>;
        let identity_repo = Arc::new(
            SledIdentityRepository::new(base_path.join("identities.sled")).map_err(storage)?,
        ) as Arc<dyn IdentityRepository>;
        let grant_repo = Arc::new(
            SledGrantRepository::new(base_path.join("grants.sled")).map_err(storage)?,
        ) as Arc<dyn GrantRepository>;

        Ok(Self {
            group_service: Arc::new(GroupService::new(
                group_repo.clone(),
                identity_repo.clone(),
                grant_repo.clone(),
            )),
            identity_service: Arc::new(IdentityService::new(identity_repo.clone())),
            grant_service: Arc::new(GrantService::new(grant_repo, group_repo, identity_repo)),
            self_identity: self_identity.into(),
        })
    }

    /// Create the reserved accounts and the administrator's grant if missing
    pub async fn bootstrap(&self) -> shared::Result<Identity> {
        defaults::bootstrap(&self.identity_service, &self.grant_service, &self.self_identity)
            .await
            .map_err(|e| shared::Error::Internal(e.to_string()))
    }

    pub async fn seed_demo_data(&self, identity_count: usize) -> shared::Result<DemoSeed> {
        defaults::seed_demo_data(
            &self.group_service,
            &self.identity_service,
            &self.grant_service,
            identity_count,
        )
        .await
        .map_err(|e| shared::Error::Internal(e.to_string()))
    }
}
