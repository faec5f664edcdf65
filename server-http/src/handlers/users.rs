use super::{directory_error, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use shared_http::api::{ListResponse, ListUsersQuery, User};

/// GET /api/users - List users, optionally the members of one group
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListResponse<User>>, ApiError> {
    // An unknown group is a 404 rather than an empty page
    if let Some(group_id) = query.group.as_deref() {
        state
            .group_service
            .get_group(group_id)
            .await
            .map_err(|e| directory_error("look up group", e))?;
    }

    let identities = state
        .identity_service
        .list_identities(query.group.as_deref(), query.name.as_deref())
        .await
        .map_err(|e| directory_error("list users", e))?;

    Ok(Json(ListResponse::new(
        identities.into_iter().map(User::from).collect(),
    )))
}

/// GET /api/users/self - The identity this server acts as
pub async fn get_self(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    let identity = state
        .identity_service
        .get_identity_by_name(&state.self_identity)
        .await
        .map_err(|e| directory_error("load current user", e))?;

    Ok(Json(identity.into()))
}
