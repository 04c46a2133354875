use std::sync::{Arc, OnceLock};

use catequesis::catequesis_auth::{Role, create_token, unix_now};
use catequesis::catequesis_config::{CorsConfig, JwtConfig};
use catequesis::catequesis_core::hash_password;
use catequesis::modules::users::directory::InMemoryUserDirectory;
use catequesis::modules::users::model::DirectoryUser;
use catequesis::router::init_router;
use catequesis::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-with-32-bytes!!";
pub const TEST_PASSWORD: &str = "catequesis2024";

pub const ADMIN_ID: i64 = 1;
pub const TEACHER_ID: i64 = 2;
pub const STAFF_ID: i64 = 3;
pub const INACTIVE_ID: i64 = 4;

pub const ADMIN_EMAIL: &str = "admin@parroquia.local";
pub const TEACHER_EMAIL: &str = "maestro1@parroquia.local";
pub const STAFF_EMAIL: &str = "secretaria@parroquia.local";
pub const INACTIVE_EMAIL: &str = "baja@parroquia.local";

// bcrypt at the default cost is slow; hash once per test binary.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).unwrap())
}

fn user(subject_id: i64, email: &str, full_name: &str, role: Role, is_active: bool) -> DirectoryUser {
    DirectoryUser {
        subject_id,
        email: email.to_string(),
        full_name: full_name.to_string(),
        role,
        password_hash: password_hash().to_string(),
        is_active,
    }
}

#[allow(dead_code)]
pub fn test_users() -> Vec<DirectoryUser> {
    vec![
        user(ADMIN_ID, ADMIN_EMAIL, "Padre Tomás", Role::Admin, true),
        user(TEACHER_ID, TEACHER_EMAIL, "Lucía Fernández", Role::Teacher, true),
        user(STAFF_ID, STAFF_EMAIL, "Marta Gil", Role::Staff, true),
        user(INACTIVE_ID, INACTIVE_EMAIL, "Andrés Ruiz", Role::Teacher, false),
    ]
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

pub fn test_state() -> AppState {
    let directory = InMemoryUserDirectory::new(test_users()).unwrap();
    AppState::new(
        test_jwt_config(),
        CorsConfig::from_source(|_| None),
        Arc::new(directory),
    )
}

#[allow(dead_code)]
pub fn setup_test_app() -> axum::Router {
    init_router(test_state())
}

/// Token for `subject_id` signed with the test secret.
#[allow(dead_code)]
pub fn token_for(state: &AppState, subject_id: i64, email: &str, role: &str) -> String {
    create_token(
        subject_id,
        email,
        role,
        state.signer.as_ref(),
        state.jwt_config.token_ttl_secs,
        unix_now(),
    )
    .unwrap()
}
