//! Access token formatting, parsing, and HMAC signing.
//!
//! Tokens are stateless: `mx_v1_{user_uuid}_{expires_at}.{signature}`, where
//! the signature is an HMAC-SHA256 over the part before the dot, base64url
//! encoded without padding. Verification needs only the signing key, never a
//! database round trip.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Access token identifier prefix.
pub const ACCESS_TOKEN_PREFIX: &str = "mx";

/// Minimum accepted signing key length in bytes.
pub const SIGNING_KEY_MIN_BYTES: usize = 32;

const SIGNATURE_BYTES: usize = 32;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenVersion {
    V1,
}

impl AccessTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for AccessTokenVersion {
    type Err = AccessTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

/// HMAC key material for signing and verifying access tokens.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Build a key from raw material, rejecting anything shorter than
    /// [`SIGNING_KEY_MIN_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns an error when the material is too short.
    pub fn new(material: &[u8]) -> Result<Self, SigningKeyError> {
        if material.len() < SIGNING_KEY_MIN_BYTES {
            return Err(SigningKeyError::TooShort {
                actual: material.len(),
            });
        }

        Ok(Self {
            bytes: material.to_vec(),
        })
    }

    fn mac(&self) -> Result<HmacSha256, AccessTokenError> {
        HmacSha256::new_from_slice(&self.bytes)
            .map_err(|_ignored| AccessTokenError::InvalidSigningKey)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum SigningKeyError {
    #[error("signing key must be at least {SIGNING_KEY_MIN_BYTES} bytes, got {actual}")]
    TooShort { actual: usize },
}

/// Claims recovered from a well-formed token string.
#[derive(Debug, Clone)]
pub struct ParsedAccessToken {
    pub user_uuid: Uuid,
    pub version: AccessTokenVersion,
    /// Expiry as Unix seconds.
    pub expires_at: i64,
    pub signature: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    #[error("access token format is invalid")]
    InvalidFormat,

    #[error("access token uses an unsupported version")]
    UnsupportedVersion,

    #[error("access token signature encoding is invalid")]
    InvalidSignatureEncoding,

    #[error("access token signature mismatch")]
    SignatureMismatch,

    #[error("access token has expired")]
    Expired,

    #[error("signing key rejected by hmac")]
    InvalidSigningKey,
}

/// Build the canonical signed portion of a token.
///
/// Format: `{prefix}_{version_segment}_{user_uuid_simple}_{expires_at}`
#[must_use]
pub fn build_signing_input(
    user_uuid: &Uuid,
    version: AccessTokenVersion,
    expires_at: i64,
) -> String {
    format!(
        "{ACCESS_TOKEN_PREFIX}_{}_{}_{expires_at}",
        version.segment(),
        user_uuid.simple(),
    )
}

/// Sign claims into a full token string.
///
/// # Errors
///
/// Returns an error when the HMAC backend rejects the key.
pub fn format_access_token(
    key: &SigningKey,
    user_uuid: &Uuid,
    version: AccessTokenVersion,
    expires_at: i64,
) -> Result<String, AccessTokenError> {
    let payload = build_signing_input(user_uuid, version, expires_at);

    let mut mac = key.mac()?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!("{payload}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

/// Split a token string into claims without checking the signature.
///
/// # Errors
///
/// Returns an error when the token does not match the expected shape.
pub fn parse_access_token(token: &str) -> Result<ParsedAccessToken, AccessTokenError> {
    let (payload, signature_b64) = token.split_once('.').ok_or(AccessTokenError::InvalidFormat)?;

    let mut parts = payload.splitn(4, '_');

    let prefix = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let version_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let user_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let expires_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;

    if prefix != ACCESS_TOKEN_PREFIX {
        return Err(AccessTokenError::InvalidFormat);
    }

    let version = AccessTokenVersion::from_str(version_segment)?;

    let user_uuid =
        Uuid::try_parse(user_segment).map_err(|_ignored| AccessTokenError::InvalidFormat)?;

    let expires_at: i64 = expires_segment
        .parse()
        .map_err(|_ignored| AccessTokenError::InvalidFormat)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_ignored| AccessTokenError::InvalidSignatureEncoding)?;

    if signature.len() != SIGNATURE_BYTES {
        return Err(AccessTokenError::InvalidSignatureEncoding);
    }

    Ok(ParsedAccessToken {
        user_uuid,
        version,
        expires_at,
        signature,
    })
}

/// Parse a token, check its signature, then check expiry against `now_unix`.
///
/// The signature is recomputed over the canonical signing input, so only
/// tokens in canonical form (simple-format UUID) verify.
///
/// # Errors
///
/// Returns an error when the token is malformed, forged, or expired.
pub fn verify_access_token(
    key: &SigningKey,
    token: &str,
    now_unix: i64,
) -> Result<ParsedAccessToken, AccessTokenError> {
    let parsed = parse_access_token(token)?;

    let payload = build_signing_input(&parsed.user_uuid, parsed.version, parsed.expires_at);

    let mut mac = key.mac()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&parsed.signature)
        .map_err(|_ignored| AccessTokenError::SignatureMismatch)?;

    if parsed.expires_at <= now_unix {
        return Err(AccessTokenError::Expired);
    }

    Ok(parsed)
}
