//! Bearer-credential gate run once per inbound request.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::claims::{Claims, Role};
use crate::error::AuthError;
use crate::jwt::verify_token;
use crate::signer::TokenSigner;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingCredential),
    }
}

/// Fails with [`AuthError::Forbidden`] unless the claim role is one of `allowed`.
///
/// A role tag outside the known set never matches.
pub fn check_allowed(claims: &Claims, allowed: &[Role]) -> Result<(), AuthError> {
    match claims.role() {
        Some(role) if allowed.contains(&role) => Ok(()),
        _ => Err(AuthError::Forbidden),
    }
}

/// Authenticates a request and optionally gates it on role.
///
/// - no usable bearer header: [`AuthError::MissingCredential`]
/// - any verification failure: [`AuthError::Unauthorized`] carrying the reason
/// - valid token but role not in `allowed_roles`: [`AuthError::Forbidden`]
pub fn authorize(
    headers: &HeaderMap,
    signer: &dyn TokenSigner,
    now: i64,
    allowed_roles: Option<&[Role]>,
) -> Result<Claims, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verify_token(token, signer, now)?;

    if let Some(allowed) = allowed_roles {
        check_allowed(&claims, allowed)?;
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;
    use crate::jwt::create_token;
    use crate::signer::HmacSigner;
    use http::HeaderValue;

    const NOW: i64 = 1_735_689_600;

    fn signer() -> HmacSigner {
        HmacSigner::new("gate-test-secret-with-enough-length")
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn bearer(role: &str) -> HeaderMap {
        let token = create_token(1, "user@parroquia.local", role, &signer(), 3600, NOW).unwrap();
        headers_with(&format!("Bearer {}", token))
    }

    #[test]
    fn test_admin_allowed_for_admin_route() {
        let claims = authorize(&bearer("admin"), &signer(), NOW, Some(&[Role::Admin])).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_admin_forbidden_on_teacher_only_route() {
        let result = authorize(&bearer("admin"), &signer(), NOW, Some(&[Role::Teacher]));
        assert_eq!(result.unwrap_err(), AuthError::Forbidden);
    }

    #[test]
    fn test_no_role_filter_accepts_any_role() {
        for role in ["admin", "teacher", "staff", "sacristan"] {
            assert!(authorize(&bearer(role), &signer(), NOW, None).is_ok());
        }
    }

    #[test]
    fn test_unknown_role_forbidden_when_filtered() {
        let result = authorize(&bearer("sacristan"), &signer(), NOW, Some(&Role::ALL));
        assert_eq!(result.unwrap_err(), AuthError::Forbidden);
    }

    #[test]
    fn test_empty_allow_list_forbids_everyone() {
        let result = authorize(&bearer("admin"), &signer(), NOW, Some(&[]));
        assert_eq!(result.unwrap_err(), AuthError::Forbidden);
    }

    #[test]
    fn test_missing_header() {
        let result = authorize(&HeaderMap::new(), &signer(), NOW, None);
        assert_eq!(result.unwrap_err(), AuthError::MissingCredential);
    }

    #[test]
    fn test_header_without_bearer_prefix() {
        for value in ["Token abc.def.ghi", "bearer abc.def.ghi", "Bearer", "Bearer ", "abc"] {
            let result = authorize(&headers_with(value), &signer(), NOW, None);
            assert_eq!(result.unwrap_err(), AuthError::MissingCredential, "{:?}", value);
        }
    }

    #[test]
    fn test_non_ascii_header_is_missing_credential() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        let result = authorize(&headers, &signer(), NOW, None);
        assert_eq!(result.unwrap_err(), AuthError::MissingCredential);
    }

    #[test]
    fn test_verifier_failures_become_unauthorized() {
        let result = authorize(&headers_with("Bearer a.b"), &signer(), NOW, None);
        assert_eq!(
            result.unwrap_err(),
            AuthError::Unauthorized(TokenError::MalformedToken)
        );

        let result = authorize(&bearer("admin"), &signer(), NOW + 3600, None);
        assert_eq!(
            result.unwrap_err(),
            AuthError::Unauthorized(TokenError::TokenExpired)
        );

        let other = HmacSigner::new("another-secret");
        let result = authorize(&bearer("admin"), &other, NOW, Some(&[Role::Admin]));
        assert_eq!(
            result.unwrap_err(),
            AuthError::Unauthorized(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_unauthorized_display_hides_reason() {
        let err = AuthError::Unauthorized(TokenError::InvalidSignature);
        assert_eq!(err.to_string(), "unauthorized");
        assert_eq!(err.reason(), "invalid_signature");
    }
}
