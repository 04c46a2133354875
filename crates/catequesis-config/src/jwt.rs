//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC secret shared by every instance (required, no default)
//! - `JWT_EXPIRY`: token lifetime in seconds (default: 604800, 7 days)
//! - `JWT_SIGNER`: `portable` (default) or `jsonwebtoken`
//!
//! There is deliberately no fallback secret: a process without `JWT_SECRET`
//! refuses to start instead of signing with a well-known value.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::parse_or;

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 604_800;

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Which HMAC-SHA256 implementation signs and verifies tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignerBackend {
    /// Pure-Rust `hmac` + `sha2`, usable on targets without native crypto.
    #[default]
    Portable,
    /// HS256 primitives from the `jsonwebtoken` crate.
    JsonWebToken,
}

impl FromStr for SignerBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" | "hmac" => Ok(SignerBackend::Portable),
            "jsonwebtoken" | "library" => Ok(SignerBackend::JsonWebToken),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SignerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerBackend::Portable => write!(f, "portable"),
            SignerBackend::JsonWebToken => write!(f, "jsonwebtoken"),
        }
    }
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
    pub signer: SignerBackend,
}

// Hand-written so the secret never ends up in logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("signer", &self.signer)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            signer: SignerBackend::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        if secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = secret.len(),
                "JWT_SECRET is shorter than {} bytes",
                RECOMMENDED_SECRET_LEN
            );
        }

        let token_ttl_secs: i64 = parse_or(&lookup, "JWT_EXPIRY", DEFAULT_TOKEN_TTL_SECS)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "JWT_EXPIRY".to_string(),
                value: token_ttl_secs.to_string(),
            });
        }

        let signer = parse_or(&lookup, "JWT_SIGNER", SignerBackend::default())?;

        Ok(Self {
            secret,
            token_ttl_secs,
            signer,
        })
    }
}
