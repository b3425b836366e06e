use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::api::TokenProvider;
use crate::auth::claims::{decode_claims, ClaimsError, VERIFIED_STATUS};
use crate::storage::StorageBackend;

/// Storage keys for the persisted credential. The four keys are always
/// written and removed as one unit.
const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_ID_KEY: &str = "user_id";
const IS_VERIFIED_KEY: &str = "is_verified";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("token could not be decoded")]
    TokenDecodeFailure(#[source] ClaimsError),

    #[error("token payload is missing required identity claims")]
    InvalidTokenPayload,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Single source of truth for the persisted credential.
///
/// Stores the access/refresh token pair together with the identity claims
/// derived from the access token (user id, verification flag). Tokens come
/// from an external login/registration flow; refresh-token exchange is also
/// external, this store only holds whatever refresh token it is given.
pub struct SessionStore<S: StorageBackend> {
    storage: Arc<S>,
}

impl<S: StorageBackend> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: StorageBackend> SessionStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Persist a new credential, replacing any prior one.
    ///
    /// The access token is decoded first; a token that cannot be decoded or
    /// whose payload lacks the user identifier or verification status is
    /// rejected and nothing is persisted. On success all four keys land as
    /// one storage unit.
    pub fn store_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), SessionError> {
        let claims = decode_claims(access_token).map_err(SessionError::TokenDecodeFailure)?;

        let (Some(user_id), Some(status)) = (claims.sub.as_deref(), claims.status.as_deref())
        else {
            return Err(SessionError::InvalidTokenPayload);
        };

        let is_verified = (status == VERIFIED_STATUS).to_string();
        self.storage.set_many(&[
            (ACCESS_TOKEN_KEY, access_token),
            (REFRESH_TOKEN_KEY, refresh_token),
            (USER_ID_KEY, user_id),
            (IS_VERIFIED_KEY, &is_verified),
        ])?;
        Ok(())
    }

    /// The persisted access token, if any. Pure lookup, no decoding.
    pub fn access_token(&self) -> Option<String> {
        self.lookup(ACCESS_TOKEN_KEY)
    }

    /// The persisted refresh token, if any. Held verbatim for the external
    /// refresh flow.
    pub fn refresh_token(&self) -> Option<String> {
        self.lookup(REFRESH_TOKEN_KEY)
    }

    /// The user id derived from the stored access token at store time.
    pub fn user_id(&self) -> Option<String> {
        self.lookup(USER_ID_KEY)
    }

    /// Whether the stored credential belongs to a verified account.
    pub fn is_verified(&self) -> bool {
        self.lookup(IS_VERIFIED_KEY).as_deref() == Some("true")
    }

    /// Remove the credential and its derived claims. Idempotent.
    pub fn clear_tokens(&self) -> Result<(), SessionError> {
        self.storage.remove_many(&[
            ACCESS_TOKEN_KEY,
            REFRESH_TOKEN_KEY,
            USER_ID_KEY,
            IS_VERIFIED_KEY,
        ])?;
        Ok(())
    }

    /// Whether a usable credential is present.
    ///
    /// False when no token is stored, when the token cannot be decoded,
    /// when it carries no expiry claim, or when the expiry has passed.
    /// Decode failures never escape this boundary.
    pub fn is_token_valid(&self) -> bool {
        let Some(token) = self.access_token() else {
            return false;
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Stored access token could not be decoded");
                return false;
            }
        };

        match claims.exp {
            Some(exp) => Utc::now().timestamp() < exp,
            // No expiry claim: fail closed.
            None => false,
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Storage read failed during session lookup");
                None
            }
        }
    }
}

impl<S: StorageBackend> TokenProvider for SessionStore<S> {
    fn access_token(&self) -> Option<String> {
        SessionStore::access_token(self)
    }
}
