use axum::{Router, routing::get};

use crate::modules::users::controller::{get_user, get_users};
use crate::state::AppState;

/// Routes guarded by their own extractors.
pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/{subject_id}", get(get_user))
}

/// Routes the caller wraps in the admin layer.
pub fn init_admin_users_router() -> Router<AppState> {
    Router::new().route("/", get(get_users))
}
