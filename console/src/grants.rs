use shared_http::api::{CLUSTER_ADMIN, Grant};
use std::cmp::Ordering;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Privileges offered when changing a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum KnownPrivilege {
    ClusterAdmin,
    Admin,
    Edit,
    View,
    Exec,
    Logs,
    PortForward,
}

/// Options for a privilege selector; an unknown current value is kept selectable.
pub fn privilege_options(current: &str) -> Vec<String> {
    let mut options: Vec<String> = KnownPrivilege::iter().map(|p| p.to_string()).collect();
    if !current.is_empty() && !options.iter().any(|o| o == current) {
        options.push(current.to_string());
    }
    options
}

/// Case-insensitive first, then exact, so distinct strings never compare equal.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn missing_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (present(a), present(b)) {
        (Some(a), Some(b)) => locale_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `cluster-admin` first, then by privilege name.
pub fn by_privilege(a: &Grant, b: &Grant) -> Ordering {
    match (a.privilege == CLUSTER_ADMIN, b.privilege == CLUSTER_ADMIN) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => missing_last(Some(&a.privilege), Some(&b.privilege)),
    }
}

pub fn by_resource(a: &Grant, b: &Grant) -> Ordering {
    missing_last(Some(&a.resource), Some(&b.resource))
}

/// Compares the user if set, otherwise the group.
pub fn by_subject(a: &Grant, b: &Grant) -> Ordering {
    missing_last(a.subject(), b.subject())
}

/// The grants shown for a group: reserved `infra` grants dropped, ordered by
/// privilege and then resource.
pub fn visible_grants(grants: Vec<Grant>) -> Vec<Grant> {
    let mut grants: Vec<Grant> = grants.into_iter().filter(|g| !g.is_reserved()).collect();
    sort_grants(&mut grants);
    grants
}

pub fn sort_grants(grants: &mut [Grant]) {
    grants.sort_by(|a, b| by_privilege(a, b).then_with(|| by_resource(a, b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(privilege: &str, resource: &str) -> Grant {
        Grant {
            id: format!("{}:{}", resource, privilege),
            user: None,
            group: Some("g1".to_string()),
            resource: resource.to_string(),
            privilege: privilege.to_string(),
            created: None,
        }
    }

    fn subject_grant(user: Option<&str>, group: Option<&str>) -> Grant {
        Grant {
            user: user.map(str::to_string),
            group: group.map(str::to_string),
            ..grant("view", "kubernetes.dev")
        }
    }

    #[test]
    fn test_cluster_admin_sorts_first() {
        let mut grants = vec![
            grant("view", "a"),
            grant("cluster-admin", "b"),
            grant("admin", "c"),
            grant("cluster-admin", "d"),
        ];
        grants.sort_by(by_privilege);

        let privileges: Vec<&str> = grants.iter().map(|g| g.privilege.as_str()).collect();
        assert_eq!(privileges, vec!["cluster-admin", "cluster-admin", "admin", "view"]);
        // stable for equal cluster-admin grants
        assert_eq!(grants[0].resource, "b");
        assert_eq!(grants[1].resource, "d");
    }

    #[test]
    fn test_privilege_comparison_ignores_case() {
        assert_eq!(by_privilege(&grant("Edit", "x"), &grant("view", "x")), Ordering::Less);
        assert_eq!(by_privilege(&grant("edit", "x"), &grant("Edit", "x")), Ordering::Greater);
        assert_eq!(by_privilege(&grant("edit", "x"), &grant("edit", "y")), Ordering::Equal);
    }

    #[test]
    fn test_missing_values_sort_last() {
        assert_eq!(by_resource(&grant("view", ""), &grant("view", "a")), Ordering::Greater);
        assert_eq!(by_resource(&grant("view", ""), &grant("view", "")), Ordering::Equal);
        assert_eq!(by_privilege(&grant("", "a"), &grant("logs", "a")), Ordering::Greater);
    }

    #[test]
    fn test_subject_prefers_user_over_group() {
        let alice = subject_grant(Some("alice"), Some("zzz"));
        let group_b = subject_grant(None, Some("b-team"));
        let nobody = subject_grant(None, None);

        assert_eq!(by_subject(&alice, &group_b), Ordering::Less);
        assert_eq!(by_subject(&group_b, &alice), Ordering::Greater);
        assert_eq!(by_subject(&nobody, &alice), Ordering::Greater);
        assert_eq!(by_subject(&nobody, &nobody), Ordering::Equal);
    }

    fn samples() -> Vec<Grant> {
        vec![
            grant("cluster-admin", "Prod"),
            grant("cluster-admin", ""),
            grant("view", "prod"),
            grant("View", "dev"),
            grant("VIEW", "Dev"),
            grant("edit", "a"),
            grant("", ""),
            grant("", "B"),
            subject_grant(Some("bob"), None),
            subject_grant(None, Some("Bob")),
            subject_grant(Some(""), Some("alice")),
            subject_grant(Some("Alice"), Some("")),
            subject_grant(Some(""), Some("")),
        ]
    }

    #[test]
    fn test_comparators_are_antisymmetric() {
        let samples = samples();
        for cmp in [by_privilege, by_resource, by_subject] {
            for a in &samples {
                for b in &samples {
                    assert_eq!(cmp(a, b), cmp(b, a).reverse());
                }
            }
        }
    }

    #[test]
    fn test_comparators_are_transitive() {
        let samples = samples();
        for cmp in [by_privilege, by_resource, by_subject] {
            for a in &samples {
                for b in &samples {
                    for c in &samples {
                        if cmp(a, b) != Ordering::Greater && cmp(b, c) != Ordering::Greater {
                            assert_ne!(cmp(a, c), Ordering::Greater);
                        }
                        if cmp(a, b) == Ordering::Equal && cmp(b, c) == Ordering::Equal {
                            assert_eq!(cmp(a, c), Ordering::Equal);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_user_falls_back_to_group() {
        let empty_user = subject_grant(Some(""), Some("alice"));
        let bob = subject_grant(Some("bob"), None);
        assert_eq!(by_subject(&empty_user, &bob), Ordering::Less);
    }

    #[test]
    fn test_visible_grants_drop_infra() {
        let grants = visible_grants(vec![
            grant("view", "kubernetes.prod"),
            grant("admin", "infra"),
            grant("edit", "kubernetes.dev"),
        ]);

        let resources: Vec<&str> = grants.iter().map(|g| g.resource.as_str()).collect();
        assert_eq!(resources, vec!["kubernetes.dev", "kubernetes.prod"]);
    }

    #[test]
    fn test_privilege_options_keep_unknown_current() {
        let options = privilege_options("view");
        assert_eq!(options.first().map(String::as_str), Some("cluster-admin"));
        assert!(options.contains(&"port-forward".to_string()));
        assert_eq!(options.len(), 7);

        let options = privilege_options("custom-role");
        assert_eq!(options.last().map(String::as_str), Some("custom-role"));
    }
}
