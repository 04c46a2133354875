use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use catequesis_auth::{AuthError, Claims, Role, authorize, unix_now};
use catequesis_core::AppError;

use crate::metrics::track_auth_rejection;
use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn subject_id(&self) -> i64 {
        self.0.subject_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// The caller's role, `None` when the token carries an unknown tag
    pub fn role(&self) -> Option<Role> {
        self.0.role()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }

    /// Whether the caller may modify the record owned by `subject_id`:
    /// admins may modify any record, everyone else only their own.
    pub fn can_manage(&self, subject_id: i64) -> bool {
        self.has_role(Role::Admin) || self.subject_id() == subject_id
    }
}

/// Turns a gate failure into the HTTP error sent to the client.
///
/// The verification reason goes to the log and the rejection counter only;
/// the response body is the same for every 401.
pub fn reject(err: AuthError) -> AppError {
    tracing::warn!(reason = err.reason(), "Request rejected by auth gate");
    track_auth_rejection(err.reason());

    match err {
        AuthError::MissingCredential => {
            AppError::unauthorized(anyhow!("Missing or malformed authorization header"))
        }
        AuthError::Unauthorized(_) => AppError::unauthorized(anyhow!("Invalid or expired token")),
        AuthError::Forbidden => AppError::forbidden(anyhow!("Forbidden")),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims =
            authorize(&parts.headers, state.signer.as_ref(), unix_now(), None).map_err(reject)?;

        Ok(AuthUser(claims))
    }
}
