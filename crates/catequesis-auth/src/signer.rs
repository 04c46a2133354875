//! HMAC-SHA256 signing capability.
//!
//! Token encoding and verification only ever talk to [`TokenSigner`]. Two
//! backends implement it and produce byte-identical signatures:
//!
//! - [`HmacSigner`]: pure Rust (`hmac` + `sha2`), no native crypto, usable on
//!   restricted targets such as WASM edge runtimes.
//! - [`JsonWebTokenSigner`]: delegates to the HS256 primitives of the
//!   `jsonwebtoken` crate.

use std::fmt;
use std::sync::Arc;

use catequesis_config::{JwtConfig, SignerBackend};
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use sha2::Sha256;

use crate::codec::{decode_segment, encode_segment};
use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

pub trait TokenSigner: Send + Sync {
    /// Raw MAC bytes over `signing_input`.
    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, TokenError>;

    /// Constant-time check of `signature` against `signing_input`.
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> bool;
}

#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

impl TokenSigner for HmacSigner {
    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(signing_input);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> bool {
        let Ok(mut mac) = self.mac() else {
            return false;
        };
        mac.update(signing_input);
        // verify_slice compares in constant time and rejects wrong lengths
        mac.verify_slice(signature).is_ok()
    }
}

#[derive(Clone)]
pub struct JsonWebTokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JsonWebTokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl fmt::Debug for JsonWebTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWebTokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner for JsonWebTokenSigner {
    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, TokenError> {
        let encoded = jsonwebtoken::crypto::sign(signing_input, &self.encoding, Algorithm::HS256)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        decode_segment(&encoded)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> bool {
        let encoded = encode_segment(signature);
        jsonwebtoken::crypto::verify(&encoded, signing_input, &self.decoding, Algorithm::HS256)
            .unwrap_or(false)
    }
}

/// Builds the signer selected by `JWT_SIGNER`, keyed with `JWT_SECRET`.
pub fn signer_from_config(config: &JwtConfig) -> Arc<dyn TokenSigner> {
    match config.signer {
        SignerBackend::Portable => Arc::new(HmacSigner::new(config.secret.as_bytes())),
        SignerBackend::JsonWebToken => Arc::new(JsonWebTokenSigner::new(config.secret.as_bytes())),
    }
}
