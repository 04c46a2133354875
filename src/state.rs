use std::fmt;
use std::sync::Arc;

use catequesis_auth::{TokenSigner, signer_from_config};
use catequesis_config::{CorsConfig, JwtConfig, ServerConfig};
use catequesis_core::warm_dummy_hash;

use crate::modules::users::directory::{DirectoryError, InMemoryUserDirectory, UserDirectory};

/// Shared, read-only application state.
///
/// Everything here is built once at startup; the signer holds the process-wide
/// secret and is never rotated while the process runs.
#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub signer: Arc<dyn TokenSigner>,
    pub directory: Arc<dyn UserDirectory>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            signer: signer_from_config(&jwt_config),
            jwt_config,
            cors_config,
            directory,
        }
    }
}

pub fn init_app_state(
    jwt_config: JwtConfig,
    cors_config: CorsConfig,
    server_config: &ServerConfig,
) -> Result<AppState, DirectoryError> {
    let directory = match &server_config.user_directory_path {
        Some(path) => {
            let directory = InMemoryUserDirectory::from_json_file(path)?;
            tracing::info!(path = %path.display(), users = directory.len(), "User directory loaded");
            directory
        }
        None => {
            tracing::warn!("USER_DIRECTORY_PATH is not set; no user will be able to log in");
            InMemoryUserDirectory::default()
        }
    };

    tracing::info!(signer = %jwt_config.signer, "Token signer configured");
    warm_dummy_hash();

    Ok(AppState::new(jwt_config, cors_config, Arc::new(directory)))
}
