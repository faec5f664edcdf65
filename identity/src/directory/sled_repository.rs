use super::error::DirectoryError;
use super::models::{Grant, Group, Identity};
use super::repository::{GrantRepository, GroupRepository, IdentityRepository};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sled::Db;
use std::path::Path;

const GROUPS_TREE: &str = "groups";
const GROUPS_BY_NAME_TREE: &str = "groups_by_name";
const IDENTITIES_TREE: &str = "identities";
const IDENTITIES_BY_NAME_TREE: &str = "identities_by_name";
const GRANTS_TREE: &str = "grants";

fn decode_all<T: DeserializeOwned>(tree: &sled::Tree) -> Result<Vec<T>, DirectoryError> {
    let mut items = Vec::new();
    for item in tree.iter() {
        let (_, data) = item?;
        items.push(serde_json::from_slice(&data)?);
    }
    Ok(items)
}

#[derive(Clone)]
pub struct SledGroupRepository {
    db: Db,
}

impl SledGroupRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn groups_tree(&self) -> Result<sled::Tree, DirectoryError> {
        Ok(self.db.open_tree(GROUPS_TREE)?)
    }

    fn groups_by_name_tree(&self) -> Result<sled::Tree, DirectoryError> {
        Ok(self.db.open_tree(GROUPS_BY_NAME_TREE)?)
    }
}

#[async_trait]
impl GroupRepository for SledGroupRepository {
    async fn create(&self, group: Group) -> Result<Group, DirectoryError> {
        if self.name_exists(&group.name).await? {
            return Err(DirectoryError::GroupAlreadyExists);
        }

        let group_json = serde_json::to_vec(&group)?;

        self.groups_tree()?
            .insert(group.id.as_bytes(), group_json)?;
        self.groups_by_name_tree()?
            .insert(group.name.as_bytes(), group.id.as_bytes())?;

        Ok(group)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, DirectoryError> {
        match self.groups_tree()?.get(id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DirectoryError> {
        // Resolve the ID through the name index first
        match self.groups_by_name_tree()?.get(name.as_bytes())? {
            Some(id) => match self.groups_tree()?.get(&id)? {
                Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Group>, DirectoryError> {
        decode_all(&self.groups_tree()?)
    }

    async fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        let groups_tree = self.groups_tree()?;

        let Some(data) = groups_tree.get(id.as_bytes())? else {
            return Err(DirectoryError::GroupNotFound);
        };
        let group: Group = serde_json::from_slice(&data)?;

        self.groups_by_name_tree()?.remove(group.name.as_bytes())?;
        groups_tree.remove(id.as_bytes())?;

        Ok(())
    }

    async fn name_exists(&self, name: &str) -> Result<bool, DirectoryError> {
        Ok(self.groups_by_name_tree()?.contains_key(name.as_bytes())?)
    }
}

#[derive(Clone)]
pub struct SledIdentityRepository {
    db: Db,
}

impl SledIdentityRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn identities_tree(&self) -> Result<sled::Tree, DirectoryError> {
        Ok(self.db.open_tree(IDENTITIES_TREE)?)
    }

    fn identities_by_name_tree(&self) -> Result<sled::Tree, DirectoryError> {
        Ok(self.db.open_tree(IDENTITIES_BY_NAME_TREE)?)
    }
}

#[async_trait]
impl IdentityRepository for SledIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, DirectoryError> {
        if self.name_exists(&identity.name).await? {
            return Err(DirectoryError::IdentityAlreadyExists);
        }

        let identity_json = serde_json::to_vec(&identity)?;

        self.identities_tree()?
            .insert(identity.id.as_bytes(), identity_json)?;
        self.identities_by_name_tree()?
            .insert(identity.name.as_bytes(), identity.id.as_bytes())?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DirectoryError> {
        match self.identities_tree()?.get(id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Identity>, DirectoryError> {
        match self.identities_by_name_tree()?.get(name.as_bytes())? {
            Some(id) => match self.identities_tree()?.get(&id)? {
                Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Identity>, DirectoryError> {
        decode_all(&self.identities_tree()?)
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<Identity>, DirectoryError> {
        let identities: Vec<Identity> = decode_all(&self.identities_tree()?)?;
        Ok(identities
            .into_iter()
            .filter(|identity| identity.is_member_of(group_id))
            .collect())
    }

    async fn set_membership(
        &self,
        identity_id: &str,
        group_id: &str,
        member: bool,
    ) -> Result<bool, DirectoryError> {
        let identities_tree = self.identities_tree()?;

        loop {
            let Some(current) = identities_tree.get(identity_id.as_bytes())? else {
                return Err(DirectoryError::IdentityNotFound);
            };
            let mut identity: Identity = serde_json::from_slice(&current)?;
            let changed = if member {
                identity.join(group_id)
            } else {
                identity.leave(group_id)
            };
            if !changed {
                return Ok(false);
            }

            let identity_json = serde_json::to_vec(&identity)?;
            // Retry from a fresh read when another writer got in first
            if identities_tree
                .compare_and_swap(identity_id.as_bytes(), Some(current), Some(identity_json))?
                .is_ok()
            {
                return Ok(true);
            }
        }
    }

    async fn name_exists(&self, name: &str) -> Result<bool, DirectoryError> {
        Ok(self
            .identities_by_name_tree()?
            .contains_key(name.as_bytes())?)
    }
}

#[derive(Clone)]
pub struct SledGrantRepository {
    db: Db,
}

impl SledGrantRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn grants_tree(&self) -> Result<sled::Tree, DirectoryError> {
        Ok(self.db.open_tree(GRANTS_TREE)?)
    }
}

#[async_trait]
impl GrantRepository for SledGrantRepository {
    async fn create(&self, grant: Grant) -> Result<Grant, DirectoryError> {
        let grant_json = serde_json::to_vec(&grant)?;
        self.grants_tree()?.insert(grant.id.as_bytes(), grant_json)?;
        Ok(grant)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Grant>, DirectoryError> {
        match self.grants_tree()?.get(id.as_bytes())? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Grant>, DirectoryError> {
        decode_all(&self.grants_tree()?)
    }

    async fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        match self.grants_tree()?.remove(id.as_bytes())? {
            Some(_) => Ok(()),
            None => Err(DirectoryError::GrantNotFound),
        }
    }
}
