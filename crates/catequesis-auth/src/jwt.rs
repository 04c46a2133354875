//! Token creation and verification.
//!
//! Tokens are compact HS256 JWTs built by hand on top of [`TokenSigner`]:
//!
//! ```text
//! base64url({"alg":"HS256","typ":"JWT"}) . base64url(claims json) . base64url(hmac)
//! ```
//!
//! Verification decodes and reads the fields back; it never re-encodes the
//! claims to compare byte layouts.
//!
//! # Example
//!
//! ```ignore
//! use catequesis_auth::{HmacSigner, create_token, verify_token};
//!
//! let signer = HmacSigner::new(secret);
//! let token = create_token(1, "admin@parroquia.local", "admin", &signer, 604_800, now)?;
//! let claims = verify_token(&token, &signer, now)?;
//! ```

use chrono::Utc;

use crate::claims::Claims;
use crate::codec::{
    ALGORITHM, Header, TokenParts, decode_json, decode_segment, encode_json, encode_segment,
    parse_json,
};
use crate::error::TokenError;
use crate::signer::TokenSigner;

pub use catequesis_config::jwt::DEFAULT_TOKEN_TTL_SECS;

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Serializes and signs an arbitrary claims value.
pub fn encode_claims(claims: &Claims, signer: &dyn TokenSigner) -> Result<String, TokenError> {
    let header = encode_json(&Header::default())?;
    let payload = encode_json(claims)?;

    let signing_input = format!("{}.{}", header, payload);
    let signature = signer.sign(signing_input.as_bytes())?;

    Ok(format!("{}.{}", signing_input, encode_segment(&signature)))
}

/// Mints a token for a freshly authenticated principal.
///
/// `issued_at` is `now` and `expires_at` is `now + ttl_secs`. The role is
/// written as given; checking it against the known set is the gate's job.
pub fn create_token(
    subject_id: i64,
    email: &str,
    role: &str,
    signer: &dyn TokenSigner,
    ttl_secs: i64,
    now: i64,
) -> Result<String, TokenError> {
    let claims = Claims {
        subject_id,
        email: email.to_string(),
        role: role.to_string(),
        issued_at: now,
        expires_at: now.saturating_add(ttl_secs),
    };

    encode_claims(&claims, signer)
}

/// [`create_token`] against the wall clock.
pub fn issue_token(
    subject_id: i64,
    email: &str,
    role: &str,
    signer: &dyn TokenSigner,
    ttl_secs: i64,
) -> Result<String, TokenError> {
    create_token(subject_id, email, role, signer, ttl_secs, unix_now())
}

/// Verifies structure, signature and expiry, then yields the claims.
///
/// All three segments are base64url-decoded and the MAC is checked before
/// any JSON is parsed, so nothing from an unauthenticated token reaches the
/// deserializer.
///
/// # Errors
///
/// - [`TokenError::MalformedToken`]: empty input, not exactly three non-empty
///   segments, bad base64url, or (once the signature has verified) non-JSON
///   segments, an `alg` other than HS256, missing or wrong-typed claims
/// - [`TokenError::InvalidSignature`]: the MAC does not match
/// - [`TokenError::TokenExpired`]: `now >= expires_at`
///
/// Any change to the header or payload of a well-formed token is reported as
/// a bad signature, whatever it does to the JSON or the claimed expiry.
pub fn verify_token(
    token: &str,
    signer: &dyn TokenSigner,
    now: i64,
) -> Result<Claims, TokenError> {
    if token.is_empty() {
        return Err(TokenError::MalformedToken);
    }

    let parts = TokenParts::split(token)?;
    let header = decode_segment(parts.header)?;
    let payload = decode_segment(parts.payload)?;
    let signature = decode_segment(parts.signature)?;

    if !signer.verify(parts.signing_input().as_bytes(), &signature) {
        return Err(TokenError::InvalidSignature);
    }

    let header: Header = parse_json(&header)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::MalformedToken);
    }

    let claims: Claims = parse_json(&payload)?;
    if claims.is_expired_at(now) {
        return Err(TokenError::TokenExpired);
    }

    Ok(claims)
}

/// [`verify_token`] against the wall clock.
pub fn verify_token_now(token: &str, signer: &dyn TokenSigner) -> Result<Claims, TokenError> {
    verify_token(token, signer, unix_now())
}

/// Reads the claims without checking signature or expiry.
///
/// Only for diagnostics (the CLI `inspect` command). Never use the result to
/// make an authorization decision.
pub fn decode_unverified(token: &str) -> Option<Claims> {
    let parts = TokenParts::split(token).ok()?;
    decode_json(parts.payload).ok()
}
