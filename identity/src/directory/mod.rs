// Public API
pub mod defaults;
pub mod error;
pub mod grant_service;
pub mod group_service;
pub mod identity_service;
pub mod models;
pub mod repository;
pub mod sled_repository;

// Re-export commonly used types
pub use error::DirectoryError;
pub use grant_service::GrantService;
pub use group_service::GroupService;
pub use identity_service::IdentityService;
pub use models::{Grant, GrantFilter, Group, Identity, Subject};
pub use repository::{GrantRepository, GroupRepository, IdentityRepository};
pub use sled_repository::{SledGrantRepository, SledGroupRepository, SledIdentityRepository};
