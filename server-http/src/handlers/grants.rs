use super::{api_error, directory_error, validation_error, ApiError};
use crate::state::AppState;
use crate::validation::{validate_create_grant, validate_grants_query};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use identity::{GrantFilter, Subject};
use shared_http::api::{CreateGrantRequest, Grant, ListGrantsQuery, ListResponse};
use tracing::info;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /api/grants - List grants matching every given filter
pub async fn list_grants(
    State(state): State<AppState>,
    Query(query): Query<ListGrantsQuery>,
) -> Result<Json<ListResponse<Grant>>, ApiError> {
    validate_grants_query(&query).map_err(validation_error)?;

    let subject = match (non_empty(query.user), non_empty(query.group)) {
        (Some(user), _) => Some(Subject::Identity(user)),
        (None, Some(group)) => Some(Subject::Group(group)),
        (None, None) => None,
    };
    let filter = GrantFilter {
        subject,
        resource: non_empty(query.resource),
        privilege: non_empty(query.privilege),
    };

    let grants = state
        .grant_service
        .list_grants(&filter)
        .await
        .map_err(|e| directory_error("list grants", e))?;

    Ok(Json(ListResponse::new(
        grants.into_iter().map(Grant::from).collect(),
    )))
}

/// POST /api/grants - Create a grant for a user or a group
pub async fn create_grant(
    State(state): State<AppState>,
    Json(req): Json<CreateGrantRequest>,
) -> Result<(StatusCode, Json<Grant>), ApiError> {
    validate_create_grant(&req).map_err(validation_error)?;

    let subject = match (non_empty(req.user), non_empty(req.group)) {
        (Some(user), _) => Subject::Identity(user),
        (None, Some(group)) => Subject::Group(group),
        (None, None) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "one of (user, group) is required",
            ))
        }
    };

    info!(
        "CREATE_GRANT: subject={}, resource={}, privilege={}",
        subject.id(),
        req.resource,
        req.privilege
    );

    let created_by = state
        .identity_service
        .get_identity_by_name(&state.self_identity)
        .await
        .ok()
        .map(|identity| identity.id);

    let grant = state
        .grant_service
        .create_grant(subject, req.resource, req.privilege, created_by)
        .await
        .map_err(|e| directory_error("create grant", e))?;

    Ok((StatusCode::CREATED, Json(grant.into())))
}

/// DELETE /api/grants/{id} - Revoke a grant
pub async fn delete_grant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE_GRANT: id={}", id);

    state
        .grant_service
        .delete_grant(&id)
        .await
        .map_err(|e| directory_error("delete grant", e))?;

    Ok(StatusCode::NO_CONTENT)
}
