//! Segment-level encoding of the compact token format.
//!
//! A token is `<header>.<payload>.<signature>`, each segment base64url
//! without padding (RFC 4648 §5). The signature covers the exact bytes of
//! `<header>.<payload>` as they appear in the token.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// The only algorithm tag ever written or accepted.
pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: Some(TOKEN_TYPE.to_string()),
        }
    }
}

pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::MalformedToken)
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::Encoding(e.to_string()))?;
    Ok(encode_segment(&json))
}

pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TokenError> {
    serde_json::from_slice(bytes).map_err(|_| TokenError::MalformedToken)
}

pub fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    parse_json(&decode_segment(segment)?)
}

/// Borrowed view over the three segments of a token.
#[derive(Debug, Clone, Copy)]
pub struct TokenParts<'a> {
    token: &'a str,
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Splits on `.`; anything but exactly three non-empty segments is malformed.
    pub fn split(token: &'a str) -> Result<Self, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::MalformedToken);
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::MalformedToken);
        }

        Ok(Self {
            token,
            header,
            payload,
            signature,
        })
    }

    /// `<header>.<payload>` exactly as received.
    pub fn signing_input(&self) -> &'a str {
        &self.token[..self.header.len() + 1 + self.payload.len()]
    }
}
