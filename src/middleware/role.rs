//! Role-based authorization for Axum
//!
//! This module provides multiple approaches for role-based access control:
//! 1. Layer-based middleware using [`require_roles`] and [`require_admin`]
//! 2. Extractor-based approach using [`RequireStaff`]
//! 3. Helper functions for checks inside controller logic

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use catequesis_auth::{Role, authorize, unix_now};
use catequesis_core::AppError;

use crate::middleware::auth::{AuthUser, reject};
use crate::state::AppState;

/// Roles allowed on office routes (secretaría work: classrooms, enrolments).
pub const STAFF_ROLES: &[Role] = &[Role::Admin, Role::Staff];

/// Middleware that lets the request through only for one of `allowed_roles`.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected_routes = Router::new()
///     .route("/aulas", post(create_aula))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, STAFF_ROLES)
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [Role],
) -> Result<Response, AppError> {
    authorize(
        req.headers(),
        state.signer.as_ref(),
        unix_now(),
        Some(allowed_roles),
    )
    .map_err(reject)?;

    Ok(next.run(req).await)
}

/// Layer for admin-only routes
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/users", get(get_users))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Extractor for office handlers (Admin or Staff)
#[derive(Debug, Clone)]
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_any_role(&auth_user, STAFF_ROLES)?;
        Ok(RequireStaff(auth_user))
    }
}

/// Fails with 403 unless the caller has exactly `required_role`.
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_role(&auth_user, Role::Admin)?;
///     // Handler logic
/// }
/// ```
pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AppError> {
    if !auth_user.has_role(required_role) {
        return Err(AppError::forbidden(anyhow!("Forbidden")));
    }

    Ok(())
}

/// Fails with 403 unless the caller has one of `allowed_roles`.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !auth_user.has_any_role(allowed_roles) {
        return Err(AppError::forbidden(anyhow!("Forbidden")));
    }

    Ok(())
}

/// Fails with 403 unless the caller is the record owner or an admin.
///
/// Used for routes such as "a teacher may edit only their own teacher record".
pub fn check_can_manage(auth_user: &AuthUser, subject_id: i64) -> Result<(), AppError> {
    if !auth_user.can_manage(subject_id) {
        return Err(AppError::forbidden(anyhow!("Forbidden")));
    }

    Ok(())
}

/// Get the hierarchy level of a role (higher number = more privileges)
pub fn role_hierarchy_level(role: &Role) -> u8 {
    role.hierarchy_level()
}

/// Check if a role has at least the specified level of access
pub fn check_role_hierarchy(user_role: &Role, minimum_required_role: &Role) -> Result<(), AppError> {
    if role_hierarchy_level(user_role) < role_hierarchy_level(minimum_required_role) {
        return Err(AppError::forbidden(anyhow!(
            "Access denied. Minimum required role: {}, but user has role: {}",
            minimum_required_role,
            user_role
        )));
    }

    Ok(())
}
