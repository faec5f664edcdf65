pub mod grants;
pub mod groups;
pub mod health;
pub mod users;

pub use grants::{create_grant, delete_grant, list_grants};
pub use groups::{create_group, delete_group, list_groups, update_group_users};
pub use health::health_check;
pub use users::{get_self, list_users};

use crate::validation::ValidationError;
use axum::{http::StatusCode, Json};
use identity::DirectoryError;
use shared_http::api::ErrorResponse;
use tracing::error;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse::new(status.as_u16(), message)),
    )
}

/// Map a directory failure onto its HTTP status
pub(crate) fn directory_error(context: &str, err: DirectoryError) -> ApiError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else {
        error!("Failed to {}: {}", context, err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    api_error(status, err.to_string())
}

pub(crate) fn validation_error(err: ValidationError) -> ApiError {
    let status = StatusCode::BAD_REQUEST;
    (
        status,
        Json(
            ErrorResponse::new(status.as_u16(), err.to_string())
                .with_field_errors(err.field_errors()),
        ),
    )
}
