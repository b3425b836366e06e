//! REST API client module for the casafind backend.
//!
//! Provides the `ApiClient` for authenticated requests against the
//! versioned HTTP API, and the `TokenProvider` seam through which the
//! bearer credential is injected into every outbound request.

pub mod client;
pub mod error;

pub use client::{ApiClient, TokenProvider};
pub use error::ApiError;
