//! HTTP client for the casafind REST API.
//!
//! Every outbound request is built through [`ApiClient::authorized`], the
//! single credential-injection point: the current bearer token is pulled
//! from the [`TokenProvider`] at send time, so call sites never handle the
//! Authorization header themselves.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Reservation, UserProfile};

use super::ApiError;

/// Default base URL for the casafind API
const API_BASE_URL: &str = "https://api.casafind.app";

/// Versioned path prefix, prepended to every resource path
const API_PATH_PREFIX: &str = "/api/v1";

/// HTTP request timeout in seconds.
/// Mobile networks are slow; 30s fails fast enough without spurious timeouts.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Source of the current access credential for outbound requests.
///
/// Implemented by `SessionStore`; returning `None` sends the request
/// unauthenticated and lets the API reject it with 401.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// API client for casafind.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client against the default API host.
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        Self::with_base_url(tokens, API_BASE_URL)
    }

    /// Create a client against a specific host (tests, staging).
    pub fn with_base_url(
        tokens: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            tokens,
        })
    }

    /// Create a client honoring the config's base-URL override.
    pub fn from_config(config: &Config, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        match config.api_base_url() {
            Some(url) => Self::with_base_url(tokens, url),
            None => Self::new(tokens),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH_PREFIX, path)
    }

    /// Credential interceptor. All request construction funnels through
    /// here; the bearer token is read from the provider at send time so a
    /// replaced credential takes effect on the next request.
    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request, retrying on 429 with exponential backoff and
    /// mapping any non-success status to an `ApiError`. The builder
    /// closure runs once per attempt.
    async fn send_checked<F>(&self, build: F) -> Result<reqwest::Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = build().send().await?;

            if response.status().is_success() {
                return Ok(response);
            }

            if response.status().as_u16() == 429 {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited);
                }
                warn!(retry = retries, backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .send_checked(|| self.authorized(Method::GET, path))
            .await?;
        Ok(response.json().await?)
    }

    // ===== Endpoints =====

    /// Fetch the profile of the currently authenticated user.
    pub async fn fetch_current_user(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/users/me").await
    }

    /// Fetch the full wishlist (reservations) for the current user.
    pub async fn fetch_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let response = self
            .send_checked(|| self.authorized(Method::GET, "/reservations"))
            .await?;
        let text = response.text().await?;

        // The API has shipped both a bare array and a wrapped object.
        if let Ok(items) = serde_json::from_str::<Vec<Reservation>>(&text) {
            return Ok(items);
        }

        #[derive(Deserialize)]
        struct ReservationsWrapper {
            #[serde(default, alias = "data")]
            reservations: Vec<Reservation>,
        }

        match serde_json::from_str::<ReservationsWrapper>(&text) {
            Ok(wrapper) => Ok(wrapper.reservations),
            Err(e) => {
                debug!(error = %e, "Unparsable reservations response");
                Err(ApiError::Unexpected {
                    status: 200,
                    body: format!("unparsable reservations payload: {e}"),
                })
            }
        }
    }

    /// Add a listing to the wishlist.
    pub async fn create_reservation(&self, listing_id: &str) -> Result<Reservation, ApiError> {
        let body = serde_json::json!({ "listingId": listing_id });
        let response = self
            .send_checked(|| self.authorized(Method::POST, "/reservations").json(&body))
            .await?;
        Ok(response.json().await?)
    }

    /// Remove a wishlist entry by its reservation id.
    pub async fn delete_reservation(&self, reservation_id: &str) -> Result<(), ApiError> {
        let path = format!("/reservations/{}", reservation_id);
        self.send_checked(|| self.authorized(Method::DELETE, &path))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedToken(Option<String>);

    impl TokenProvider for FixedToken {
        fn access_token(&self) -> Option<String> {
            self.0.clone()
        }
    }

    fn client_for(server: &mockito::Server, token: Option<&str>) -> ApiClient {
        let tokens = Arc::new(FixedToken(token.map(String::from)));
        ApiClient::with_base_url(tokens, server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_header_is_injected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/users/me")
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"u1"}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("tok-123"));
        let profile = client.fetch_current_user().await.unwrap();
        assert_eq!(profile.id, "u1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_token_sends_no_header_and_maps_401() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/users/me")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let err = client.fetch_current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reservations_parse_array_and_wrapper() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server, Some("tok"));

        let as_array = server
            .mock("GET", "/api/v1/reservations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"r1","listingId":"l1"}]"#)
            .expect(1)
            .create_async()
            .await;
        let items = client.fetch_reservations().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].listing_id, "l1");
        as_array.assert_async().await;

        let as_wrapper = server
            .mock("GET", "/api/v1/reservations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reservations":[{"id":"r2","listingId":"l2"}]}"#)
            .expect(1)
            .create_async()
            .await;
        let items = client.fetch_reservations().await.unwrap();
        assert_eq!(items[0].id, "r2");
        as_wrapper.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_maps_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/v1/reservations/r9")
            .with_status(404)
            .with_body("no such reservation")
            .create_async()
            .await;

        let client = client_for(&server, Some("tok"));
        let err = client.delete_reservation("r9").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
