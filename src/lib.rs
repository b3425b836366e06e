//! casafind-core - session and entity-cache layer for the casafind
//! real-estate marketplace client.
//!
//! UI layers sit on top of two cooperating components:
//!
//! - [`auth::SessionStore`]: owns the persisted token pair and the
//!   identity claims derived from it; answers "is there a usable
//!   credential".
//! - [`cache::UserCache`] / [`cache::Wishlist`]: read-through caching of
//!   remote entities and pass-through wishlist mutations, authorized via
//!   the session's credential.
//!
//! Storage is an injected capability ([`storage::StorageBackend`]), so
//! everything here runs unchanged against the OS keychain, a JSON file,
//! or an in-memory fake in tests.
//!
//! ```no_run
//! use std::sync::Arc;
//! use casafind_core::api::ApiClient;
//! use casafind_core::auth::SessionStore;
//! use casafind_core::cache::{UserCache, Wishlist};
//! use casafind_core::config::Config;
//! use casafind_core::storage::FileStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let storage = Arc::new(FileStore::new(config.data_dir()?)?);
//! let session = SessionStore::new(Arc::clone(&storage));
//! let api = ApiClient::from_config(&config, Arc::new(session.clone()))?;
//! let user_cache = UserCache::new(storage, session, api.clone());
//! let wishlist = Wishlist::new(api);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiClient, ApiError, TokenProvider};
pub use auth::{SessionError, SessionStore};
pub use cache::{CacheError, UserCache, Wishlist};
pub use config::Config;
pub use models::{Reservation, UserProfile};
pub use storage::{FileStore, KeychainStore, MemoryStore, StorageBackend};
