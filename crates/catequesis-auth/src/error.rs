use thiserror::Error;

/// Why a token could not be produced or accepted.
///
/// The variants are for logs and metrics. The HTTP layer collapses all of
/// them into a single 401 so a caller cannot tell a bad signature from an
/// expired token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    MalformedToken,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Stable label used as a metric/log field.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed_token",
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Encoding(_) => "encoding",
        }
    }
}

/// Outcome of the bearer gate in front of a route.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing or malformed bearer credential")]
    MissingCredential,

    #[error("unauthorized")]
    Unauthorized(#[source] TokenError),

    #[error("forbidden")]
    Forbidden,
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::Unauthorized(inner) => inner.reason(),
            AuthError::Forbidden => "forbidden",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Unauthorized(err)
    }
}
