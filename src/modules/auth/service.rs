use anyhow::anyhow;
use catequesis_auth::{TokenSigner, create_token};
use catequesis_config::JwtConfig;
use catequesis_core::{AppError, verify_dummy_password, verify_password};
use tracing::instrument;

use crate::metrics::{track_login_failure, track_login_success};
use crate::modules::users::directory::UserDirectory;
use crate::modules::users::model::UserProfile;

use super::model::{LoginRequest, LoginResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Checks credentials against the directory and mints a token.
    ///
    /// Unknown e-mail, inactive account and wrong password all produce the
    /// same 401 after the same bcrypt work, so neither the body nor the
    /// response time reveals which accounts exist.
    #[instrument(skip(directory, signer, jwt_config))]
    pub async fn login_user(
        directory: &dyn UserDirectory,
        signer: &dyn TokenSigner,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
        now: i64,
    ) -> Result<LoginResponse, AppError> {
        let user = directory.find_by_email(&dto.email).await;

        // Every path pays for one bcrypt check, off the async workers.
        let stored_hash = user
            .as_ref()
            .filter(|user| user.is_active)
            .map(|user| user.password_hash.clone());
        let password = dto.password;
        let password_matches = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => verify_password(&password, &hash),
            None => Ok(verify_dummy_password(&password)),
        })
        .await
        .map_err(|e| AppError::internal(anyhow!("Password check task failed: {}", e)))??;

        let Some(user) = user else {
            tracing::info!(reason = "unknown_email", "Login rejected");
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        };

        if !user.is_active {
            tracing::info!(subject_id = user.subject_id, reason = "inactive", "Login rejected");
            track_login_failure("inactive");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        if !password_matches {
            tracing::info!(subject_id = user.subject_id, reason = "bad_password", "Login rejected");
            track_login_failure("bad_password");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        let token = create_token(
            user.subject_id,
            &user.email,
            user.role.as_str(),
            signer,
            jwt_config.token_ttl_secs,
            now,
        )
        .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))?;

        tracing::info!(subject_id = user.subject_id, role = %user.role, "Login succeeded");
        track_login_success(user.role.as_str());

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at: now.saturating_add(jwt_config.token_ttl_secs),
            user: UserProfile::from(&user),
        })
    }
}
