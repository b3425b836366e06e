//! Session management for the marketplace client.
//!
//! This module provides:
//! - `TokenClaims`: identity claims decoded from the bearer access token
//! - `SessionStore`: persisted token lifecycle (store, validate, clear)
//!
//! The client holds no signing key, so tokens are never verified
//! cryptographically here; validity means "present, decodable, and not
//! past its expiry claim". A malformed or tampered token signals
//! "not authenticated" rather than an error.

pub mod claims;
pub mod session;

pub use claims::{decode_claims, ClaimsError, TokenClaims};
pub use session::{SessionError, SessionStore};
