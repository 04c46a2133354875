//! Middleware modules for request processing.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor and the mapping of gate errors to responses
//! - [`role`]: role layers, role extractors and role checking helpers
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` (or a role layer) runs `catequesis_auth::authorize`
//! 3. Role layers / extractors check the claim role against the route's allow list
//! 4. Handler executes if all checks pass
//!
//! Missing header and every verification failure answer 401 with a fixed
//! message; a valid token with the wrong role answers 403.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::{RequireStaff, check_can_manage};
//!
//! // Any valid token
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Admin or staff only
//! async fn create_aula(RequireStaff(auth_user): RequireStaff) -> impl IntoResponse { /* ... */ }
//!
//! // Teachers may only edit themselves
//! async fn update_maestro(auth_user: AuthUser, Path(id): Path<i64>) -> Result<_, AppError> {
//!     check_can_manage(&auth_user, id)?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
