use anyhow::anyhow;
use catequesis_auth::Claims;
use catequesis_core::AppError;
use tracing::instrument;

use super::directory::UserDirectory;
use super::model::{UserFilterParams, UserProfile};

pub struct UserService;

impl UserService {
    #[instrument(skip(directory))]
    pub async fn get_users(
        directory: &dyn UserDirectory,
        filter: UserFilterParams,
    ) -> Result<Vec<UserProfile>, AppError> {
        let users = directory.list(filter.role).await;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Office lookup: inactive users are still returned.
    #[instrument(skip(directory))]
    pub async fn get_user_by_id(
        directory: &dyn UserDirectory,
        subject_id: i64,
    ) -> Result<UserProfile, AppError> {
        directory
            .find_by_id(subject_id)
            .await
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Resolves the caller of a verified token to their current directory record.
    ///
    /// The token alone is not enough: the user may have been removed (404) or
    /// deactivated (403) since it was issued.
    #[instrument(skip(directory, claims), fields(subject_id = claims.subject_id))]
    pub async fn get_current_user(
        directory: &dyn UserDirectory,
        claims: &Claims,
    ) -> Result<UserProfile, AppError> {
        let user = directory
            .find_by_id(claims.subject_id)
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if !user.is_active {
            return Err(AppError::forbidden(anyhow!("Account is disabled")));
        }

        Ok(UserProfile::from(&user))
    }
}
