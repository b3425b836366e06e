use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::models::UserProfile;
use crate::storage::StorageBackend;

use super::CacheError;

/// Storage key for the current-user snapshot
const USER_CACHE_KEY: &str = "user";

/// A persisted snapshot with its fetch time. The timestamp is for
/// display; snapshots stay valid until overwritten or cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew (negative) too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Read-through cache of the current user profile.
///
/// A read consults the persisted snapshot first unless a refresh is
/// forced; on a miss it checks session validity, fetches from the API,
/// and overwrites the snapshot. A corrupt or unreadable snapshot is
/// treated as a miss, never as an error.
pub struct UserCache<S: StorageBackend> {
    storage: Arc<S>,
    session: SessionStore<S>,
    api: ApiClient,
}

impl<S: StorageBackend> UserCache<S> {
    pub fn new(storage: Arc<S>, session: SessionStore<S>, api: ApiClient) -> Self {
        Self {
            storage,
            session,
            api,
        }
    }

    /// Fetch the current user, from the snapshot when possible.
    pub async fn current(&self, force_refresh: bool) -> Result<UserProfile, CacheError> {
        if !force_refresh {
            if let Some(snapshot) = self.load_snapshot() {
                return Ok(snapshot.data);
            }
        }

        if !self.session.is_token_valid() {
            return Err(CacheError::NotAuthenticated);
        }

        let profile = match self.api.fetch_current_user().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Current-user fetch failed");
                return Err(e.into());
            }
        };

        self.save_snapshot(&profile);
        Ok(profile)
    }

    /// Remove the persisted snapshot. Idempotent.
    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove(USER_CACHE_KEY)
            .context("Failed to clear user snapshot")
    }

    /// Human-readable age of the current snapshot, if one exists.
    pub fn age(&self) -> Option<String> {
        self.load_snapshot().map(|s| s.age_display())
    }

    fn load_snapshot(&self) -> Option<CachedData<UserProfile>> {
        let raw = match self.storage.get(USER_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                debug!(error = %e, "Failed to read user snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(error = %e, "Corrupt user snapshot, treating as miss");
                None
            }
        }
    }

    fn save_snapshot(&self, profile: &UserProfile) {
        let snapshot = CachedData::new(profile.clone());
        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize user snapshot");
                return;
            }
        };
        // A failed write leaves the old snapshot; the fresh result is
        // still returned to the caller.
        if let Err(e) = self.storage.set(USER_CACHE_KEY, &raw) {
            warn!(error = %e, "Failed to persist user snapshot");
        }
    }
}
