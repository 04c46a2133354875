//! The user directory consulted at login and by `/api/auth/me`.
//!
//! The directory is a read-only collaborator. The bundled implementation is
//! loaded once at startup from a JSON array:
//!
//! ```json
//! [
//!   {
//!     "subject_id": 1,
//!     "email": "admin@parroquia.local",
//!     "full_name": "Administrador Sistema",
//!     "role": "admin",
//!     "password_hash": "$2b$12$...",
//!     "is_active": true
//!   }
//! ]
//! ```
//!
//! Hashes come from `catequesis-cli hash-password`. `is_active` defaults to
//! `true`; roles accept the legacy `maestro` and `secretaria` tags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catequesis_auth::Role;
use thiserror::Error;

use super::model::DirectoryUser;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read user directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse user directory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate e-mail in user directory: {0}")]
    DuplicateEmail(String),

    #[error("duplicate subject id in user directory: {0}")]
    DuplicateSubject(i64),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Case-insensitive lookup by login e-mail.
    async fn find_by_email(&self, email: &str) -> Option<DirectoryUser>;

    async fn find_by_id(&self, subject_id: i64) -> Option<DirectoryUser>;

    /// All users ordered by subject id, optionally restricted to one role.
    async fn list(&self, role: Option<Role>) -> Vec<DirectoryUser>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<DirectoryUser>,
    by_email: HashMap<String, usize>,
    by_id: HashMap<i64, usize>,
}

impl InMemoryUserDirectory {
    pub fn new(mut users: Vec<DirectoryUser>) -> Result<Self, DirectoryError> {
        users.sort_by_key(|user| user.subject_id);

        let mut by_email = HashMap::with_capacity(users.len());
        let mut by_id = HashMap::with_capacity(users.len());

        for (index, user) in users.iter().enumerate() {
            if by_email.insert(user.email.to_lowercase(), index).is_some() {
                return Err(DirectoryError::DuplicateEmail(user.email.clone()));
            }
            if by_id.insert(user.subject_id, index).is_some() {
                return Err(DirectoryError::DuplicateSubject(user.subject_id));
            }
        }

        Ok(Self {
            users,
            by_email,
            by_id,
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let users: Vec<DirectoryUser> =
            serde_json::from_str(&raw).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::new(users)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Option<DirectoryUser> {
        self.by_email
            .get(&email.to_lowercase())
            .map(|&index| self.users[index].clone())
    }

    async fn find_by_id(&self, subject_id: i64) -> Option<DirectoryUser> {
        self.by_id
            .get(&subject_id)
            .map(|&index| self.users[index].clone())
    }

    async fn list(&self, role: Option<Role>) -> Vec<DirectoryUser> {
        self.users
            .iter()
            .filter(|user| role.is_none_or(|role| user.role == role))
            .cloned()
            .collect()
    }
}
