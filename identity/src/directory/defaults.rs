use super::error::DirectoryError;
use super::grant_service::GrantService;
use super::group_service::GroupService;
use super::identity_service::IdentityService;
use super::models::{GrantFilter, Group, Identity, Subject};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use tracing::info;

/// Reserved system account used by cluster connectors.
pub const CONNECTOR_NAME: &str = "connector";
/// Reserved resource naming the directory itself.
pub const INFRA_RESOURCE: &str = "infra";
pub const ADMIN_PRIVILEGE: &str = "admin";

const DEMO_GROUPS: [&str; 3] = ["engineering", "design", "support"];
const DEMO_GROUP_GRANTS: [(&str, &str); 3] = [
    ("kubernetes.dev", "edit"),
    ("kubernetes.prod", "view"),
    ("kubernetes.staging", "logs"),
];

/// Ensure the reserved connector account and the administrator exist, and that
/// the administrator holds the `admin` privilege on the `infra` resource.
pub async fn bootstrap(
    identity_service: &IdentityService,
    grant_service: &GrantService,
    admin_name: &str,
) -> Result<Identity, DirectoryError> {
    identity_service.ensure_identity(CONNECTOR_NAME).await?;
    let admin = identity_service.ensure_identity(admin_name).await?;

    let subject = Subject::Identity(admin.id.clone());
    let filter = GrantFilter::for_subject(subject.clone())
        .resource(INFRA_RESOURCE)
        .privilege(ADMIN_PRIVILEGE);

    if !grant_service.has_grant(&filter).await? {
        grant_service
            .create_grant(
                subject,
                INFRA_RESOURCE.to_string(),
                ADMIN_PRIVILEGE.to_string(),
                None,
            )
            .await?;
        info!("Granted {} on '{}' to {}", ADMIN_PRIVILEGE, INFRA_RESOURCE, admin.name);
    }

    Ok(admin)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DemoSeed {
    pub identities: usize,
    pub groups: usize,
    pub grants: usize,
}

/// Populate the directory with fake users, a few groups and their grants.
///
/// Safe to run repeatedly: existing groups and grants are reused.
pub async fn seed_demo_data(
    group_service: &GroupService,
    identity_service: &IdentityService,
    grant_service: &GrantService,
    identity_count: usize,
) -> Result<DemoSeed, DirectoryError> {
    let mut seed = DemoSeed::default();

    let mut identities = Vec::with_capacity(identity_count);
    for _ in 0..identity_count {
        let email: String = SafeEmail().fake();
        match identity_service.create_identity(email).await {
            Ok(identity) => {
                seed.identities += 1;
                identities.push(identity);
            }
            Err(DirectoryError::IdentityAlreadyExists) => continue,
            Err(e) => return Err(e),
        }
    }

    let mut groups: Vec<Group> = Vec::with_capacity(DEMO_GROUPS.len());
    for name in DEMO_GROUPS {
        let group = match group_service.create_group(name.to_string()).await {
            Ok(group) => {
                seed.groups += 1;
                group
            }
            Err(DirectoryError::GroupAlreadyExists) => {
                let existing = group_service.list_groups(Some(name)).await?;
                match existing.into_iter().next() {
                    Some(group) => group,
                    None => return Err(DirectoryError::GroupNotFound),
                }
            }
            Err(e) => return Err(e),
        };

        for (resource, privilege) in DEMO_GROUP_GRANTS {
            match grant_service
                .create_grant(
                    Subject::Group(group.id.clone()),
                    resource.to_string(),
                    privilege.to_string(),
                    None,
                )
                .await
            {
                Ok(_) => seed.grants += 1,
                Err(DirectoryError::GrantAlreadyExists) => {}
                Err(e) => return Err(e),
            }
        }

        groups.push(group);
    }

    // Spread the new identities over the groups
    for (i, identity) in identities.iter().enumerate() {
        let group = &groups[i % groups.len()];
        group_service
            .update_members(&group.id, std::slice::from_ref(&identity.id), &[])
            .await?;
    }

    info!(
        "Seeded demo data: {} identities, {} groups, {} grants",
        seed.identities, seed.groups, seed.grants
    );
    Ok(seed)
}
