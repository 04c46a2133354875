//! # Catequesis Auth
//!
//! Token-based authentication for the Catequesis API.
//!
//! This crate provides:
//!
//! - [`claims`]: the signed [`Claims`] payload and the closed [`Role`] set
//! - [`codec`]: base64url segments and the fixed HS256 header
//! - [`signer`]: the [`TokenSigner`] capability with a portable and a `jsonwebtoken` backend
//! - [`jwt`]: [`create_token`] and [`verify_token`]
//! - [`gate`]: [`authorize`], the per-request bearer check with optional role filter
//!
//! There is no server-side session store. Every request re-verifies its token
//! and logging out is a client-side discard; a token stays valid until it
//! expires.
//!
//! # Example
//!
//! ```ignore
//! use catequesis_auth::{Role, authorize, signer_from_config, unix_now};
//! use catequesis_config::JwtConfig;
//!
//! let signer = signer_from_config(&JwtConfig::from_env()?);
//! let claims = authorize(request.headers(), signer.as_ref(), unix_now(), Some(&[Role::Admin]))?;
//! println!("subject: {}", claims.subject_id);
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod signer;

// Re-export commonly used types at crate root
pub use claims::{Claims, Role, UnknownRole};
pub use error::{AuthError, TokenError};
pub use gate::{authorize, bearer_token, check_allowed};
pub use jwt::{
    DEFAULT_TOKEN_TTL_SECS, create_token, decode_unverified, encode_claims, issue_token,
    unix_now, verify_token, verify_token_now,
};
pub use signer::{HmacSigner, JsonWebTokenSigner, TokenSigner, signer_from_config};
