use catequesis_auth::Role;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A login-capable principal as stored in the user directory.
///
/// Never serialized to clients; see [`UserProfile`].
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUser {
    pub subject_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub password_hash: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Public projection of a directory user, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub subject_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&DirectoryUser> for UserProfile {
    fn from(user: &DirectoryUser) -> Self {
        Self {
            subject_id: user.subject_id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UserFilterParams {
    /// Only return users with this role
    pub role: Option<Role>,
}
