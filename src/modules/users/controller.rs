use axum::{
    Json,
    extract::{Path, Query, State},
};
use catequesis_core::AppError;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireStaff;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{UserFilterParams, UserProfile};
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// List directory users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserFilterParams),
    responses(
        (status = 200, description = "List of users", body = Vec<UserProfile>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filter): Query<UserFilterParams>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    tracing::debug!(caller = auth_user.subject_id(), "Listing directory users");
    let users = UserService::get_users(state.directory.as_ref(), filter).await?;
    Ok(Json(users))
}

/// Look up one directory user (admin and staff)
#[utoipa::path(
    get,
    path = "/api/users/{subject_id}",
    params(
        ("subject_id" = i64, Path, description = "Directory subject id")
    ),
    responses(
        (status = 200, description = "User found", body = UserProfile),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin or staff role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    RequireStaff(auth_user): RequireStaff,
    Path(subject_id): Path<i64>,
) -> Result<Json<UserProfile>, AppError> {
    tracing::debug!(caller = auth_user.subject_id(), subject_id, "Looking up directory user");
    let user = UserService::get_user_by_id(state.directory.as_ref(), subject_id).await?;
    Ok(Json(user))
}
