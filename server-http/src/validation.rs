use shared_http::api::{
    CreateGrantRequest, CreateGroupRequest, FieldError, ListGrantsQuery,
    UpdateUsersInGroupRequest,
};
use std::collections::BTreeMap;

// Constants for validation ranges
const MAX_NAME_LENGTH: usize = 256;

const REQUIRED: &str = "a value is required";

/// Field-level validation failures, keyed by JSON field name
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationError {
    field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    fn add(&mut self, field: &str, problem: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(problem.into());
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.field_errors
            .iter()
            .map(|(field_name, errors)| FieldError {
                field_name: field_name.clone(),
                errors: errors.clone(),
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, (field, problems)) in self.field_errors.iter().enumerate() {
            if i != 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, problems.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn check_name(errors: &mut ValidationError, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
    } else if value.chars().count() > MAX_NAME_LENGTH {
        errors.add(
            field,
            format!(
                "length ({}) must be no more than {}",
                value.chars().count(),
                MAX_NAME_LENGTH
            ),
        );
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

pub fn validate_create_group(req: &CreateGroupRequest) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    check_name(&mut errors, "name", &req.name);
    errors.into_result()
}

pub fn validate_create_grant(req: &CreateGrantRequest) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();

    match (is_set(&req.user), is_set(&req.group)) {
        (false, false) => errors.add("user", "one of (user, group) is required"),
        (true, true) => errors.add("user", "only one of (user, group) can have a value"),
        _ => {}
    }
    check_name(&mut errors, "resource", &req.resource);
    check_name(&mut errors, "privilege", &req.privilege);

    errors.into_result()
}

pub fn validate_membership_patch(req: &UpdateUsersInGroupRequest) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();

    if req.users_to_add.iter().any(|id| id.is_empty()) {
        errors.add("usersToAdd", "ids must not be empty");
    }
    if req.users_to_remove.iter().any(|id| id.is_empty()) {
        errors.add("usersToRemove", "ids must not be empty");
    }
    if req
        .users_to_add
        .iter()
        .any(|id| req.users_to_remove.contains(id))
    {
        errors.add("usersToRemove", "cannot add and remove the same user");
    }

    errors.into_result()
}

pub fn validate_grants_query(query: &ListGrantsQuery) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    if is_set(&query.user) && is_set(&query.group) {
        errors.add("user", "only one of (user, group) can have a value");
    }
    errors.into_result()
}
