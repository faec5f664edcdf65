use super::{directory_error, validation_error, ApiError};
use crate::state::AppState;
use crate::validation::{validate_create_group, validate_membership_patch};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared_http::api::{
    CreateGroupRequest, Group, ListGroupsQuery, ListResponse, UpdateUsersInGroupRequest,
};
use tracing::info;

/// GET /api/groups - List groups, optionally by exact name
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<ListGroupsQuery>,
) -> Result<Json<ListResponse<Group>>, ApiError> {
    let groups = state
        .group_service
        .list_groups(query.name.as_deref())
        .await
        .map_err(|e| directory_error("list groups", e))?;

    Ok(Json(ListResponse::new(
        groups.into_iter().map(Group::from).collect(),
    )))
}

/// POST /api/groups - Create a new group
pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    validate_create_group(&req).map_err(validation_error)?;

    info!("CREATE_GROUP: name={}", req.name);

    let group = state
        .group_service
        .create_group(req.name)
        .await
        .map_err(|e| directory_error("create group", e))?;

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// DELETE /api/groups/{id} - Delete a group with its grants and memberships
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE_GROUP: id={}", id);

    state
        .group_service
        .delete_group(&id)
        .await
        .map_err(|e| directory_error("delete group", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/groups/{id}/users - Add and remove members
pub async fn update_group_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUsersInGroupRequest>,
) -> Result<StatusCode, ApiError> {
    validate_membership_patch(&req).map_err(validation_error)?;

    info!(
        "UPDATE_GROUP_USERS: id={}, add={}, remove={}",
        id,
        req.users_to_add.len(),
        req.users_to_remove.len()
    );

    state
        .group_service
        .update_members(&id, &req.users_to_add, &req.users_to_remove)
        .await
        .map_err(|e| directory_error("update group members", e))?;

    Ok(StatusCode::NO_CONTENT)
}
