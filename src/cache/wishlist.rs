use tracing::warn;

use crate::api::ApiClient;
use crate::models::Reservation;

use super::CacheError;

/// Wishlist operations over the reservations resource.
///
/// Pure pass-through: every call goes to the API with the session's
/// credential; there is no offline queue and no persisted wishlist
/// snapshot. Failures are logged here and returned typed, so a caller
/// can tell "not in the wishlist" from "could not ask".
pub struct Wishlist {
    api: ApiClient,
}

impl Wishlist {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All wishlist entries for the current user.
    pub async fn list(&self) -> Result<Vec<Reservation>, CacheError> {
        self.api.fetch_reservations().await.map_err(|e| {
            warn!(error = %e, "Wishlist list failed");
            e.into()
        })
    }

    /// Save a listing to the wishlist.
    pub async fn add(&self, listing_id: &str) -> Result<Reservation, CacheError> {
        self.api.create_reservation(listing_id).await.map_err(|e| {
            warn!(listing_id, error = %e, "Wishlist add failed");
            e.into()
        })
    }

    /// Remove a wishlist entry.
    pub async fn remove(&self, reservation_id: &str) -> Result<(), CacheError> {
        self.api.delete_reservation(reservation_id).await.map_err(|e| {
            warn!(reservation_id, error = %e, "Wishlist remove failed");
            e.into()
        })
    }

    /// Whether a listing is wishlisted. There is no existence endpoint;
    /// this fetches the full list and scans it, O(n) in list size.
    pub async fn contains(&self, listing_id: &str) -> Result<bool, CacheError> {
        let entries = self.list().await?;
        Ok(entries.iter().any(|r| r.listing_id == listing_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TokenProvider;
    use std::sync::Arc;

    struct FixedToken;

    impl TokenProvider for FixedToken {
        fn access_token(&self) -> Option<String> {
            Some("tok".to_string())
        }
    }

    fn wishlist_against(server: &mockito::Server) -> Wishlist {
        let api = ApiClient::with_base_url(Arc::new(FixedToken), server.url()).unwrap();
        Wishlist::new(api)
    }

    async fn mock_list(server: &mut mockito::Server, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/api/v1/reservations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_contains_on_empty_list() {
        let mut server = mockito::Server::new_async().await;
        mock_list(&mut server, "[]").await;
        let wishlist = wishlist_against(&server);
        assert!(!wishlist.contains("l1").await.unwrap());
    }

    #[tokio::test]
    async fn test_contains_finds_single_match() {
        let mut server = mockito::Server::new_async().await;
        mock_list(&mut server, r#"[{"id":"r1","listingId":"l1"}]"#).await;
        let wishlist = wishlist_against(&server);
        assert!(wishlist.contains("l1").await.unwrap());
    }

    #[tokio::test]
    async fn test_contains_misses_in_multi_item_list() {
        let mut server = mockito::Server::new_async().await;
        mock_list(
            &mut server,
            r#"[{"id":"r1","listingId":"l1"},{"id":"r2","listingId":"l2"},{"id":"r3","listingId":"l3"}]"#,
        )
        .await;
        let wishlist = wishlist_against(&server);
        assert!(!wishlist.contains("l9").await.unwrap());
        assert!(wishlist.contains("l2").await.unwrap());
    }

    #[tokio::test]
    async fn test_contains_failure_is_not_a_miss() {
        // A transport failure must be distinguishable from "not present" -
        // the legacy client collapsed both to false.
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/reservations")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let wishlist = wishlist_against(&server);
        let err = wishlist.contains("l1").await.unwrap_err();
        assert!(matches!(err, CacheError::Transient(_)));
    }

    #[tokio::test]
    async fn test_add_posts_listing_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/reservations")
            .match_body(mockito::Matcher::JsonString(
                r#"{"listingId":"l5"}"#.to_string(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"r5","listingId":"l5"}"#)
            .create_async()
            .await;

        let wishlist = wishlist_against(&server);
        let created = wishlist.add("l5").await.unwrap();
        assert_eq!(created.id, "r5");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_remove_maps_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/v1/reservations/r7")
            .with_status(404)
            .create_async()
            .await;

        let wishlist = wishlist_against(&server);
        let err = wishlist.remove("r7").await.unwrap_err();
        assert!(matches!(err, CacheError::NotFound));
    }
}
