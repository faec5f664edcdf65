//! Directory of identities, groups and the grants that bind them to resources.
//!
//! This is the storage and rules layer behind the development API server.

pub mod directory;

pub use directory::{
    DirectoryError, Grant, GrantFilter, GrantService, Group, GroupService, Identity,
    IdentityService, Subject,
};
