use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

/// Verification status value meaning the account passed identity checks.
/// Any other status string is treated as unverified.
pub const VERIFIED_STATUS: &str = "verified";

#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("token is not a three-segment bearer token")]
    MalformedToken,

    #[error("token payload is not valid base64: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
}

/// Identity claims carried in the access token payload.
///
/// Claims are derived, never persisted on their own: re-decoding the
/// current token is always the source of truth.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Stable user identifier.
    #[serde(alias = "user_id")]
    pub sub: Option<String>,

    /// Verification status string (`"verified"` or other).
    #[serde(alias = "verification_status")]
    pub status: Option<String>,

    /// Expiry, seconds since epoch.
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_verified(&self) -> bool {
        self.status.as_deref() == Some(VERIFIED_STATUS)
    }

    /// Whether both required identity fields are present.
    pub fn has_identity(&self) -> bool {
        self.sub.is_some() && self.status.is_some()
    }
}

/// Decode the claims payload of a bearer token without verifying its
/// signature. The signature segment must be present but is not inspected.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(ClaimsError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}
