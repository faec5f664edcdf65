use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Group not found")]
    GroupNotFound,

    #[error("Identity not found")]
    IdentityNotFound,

    #[error("Grant not found")]
    GrantNotFound,

    #[error("Group already exists")]
    GroupAlreadyExists,

    #[error("Identity already exists")]
    IdentityAlreadyExists,

    #[error("Grant already exists")]
    GrantAlreadyExists,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DirectoryError::GroupNotFound
                | DirectoryError::IdentityNotFound
                | DirectoryError::GrantNotFound
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DirectoryError::GroupAlreadyExists
                | DirectoryError::IdentityAlreadyExists
                | DirectoryError::GrantAlreadyExists
        )
    }
}

impl From<sled::Error> for DirectoryError {
    fn from(err: sled::Error) -> Self {
        DirectoryError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::SerializationError(err.to_string())
    }
}
