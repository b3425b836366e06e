//! Client-side entity cache over the remote API.
//!
//! This module provides:
//! - `UserCache`: read-through caching of the current user profile
//! - `Wishlist`: pass-through wishlist mutations (no offline queue)
//! - `CacheError`: the result taxonomy callers branch on
//!
//! Reads prefer a persisted snapshot; mutations always go to the API.
//! Snapshots are trusted until a forced refresh or an explicit clear -
//! they carry a timestamp for age display, but no TTL is enforced.

pub mod user;
pub mod wishlist;

pub use user::{CachedData, UserCache};
pub use wishlist::Wishlist;

use thiserror::Error;

use crate::api::ApiError;

/// Why a cache or wishlist operation could not produce a value.
///
/// Distinguishes "no credential" from "the backend said no" from "the
/// backend was unreachable", so UI layers can render empty-state,
/// login prompt, and retry affordances separately.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("not found")]
    NotFound,

    #[error("transient failure: {0}")]
    Transient(#[source] ApiError),
}

impl From<ApiError> for CacheError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => CacheError::NotAuthenticated,
            ApiError::NotFound(_) => CacheError::NotFound,
            other => CacheError::Transient(other),
        }
    }
}
