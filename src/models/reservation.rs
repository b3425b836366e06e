use serde::{Deserialize, Serialize};

/// A wishlist entry: a saved listing, kept server-side under the
/// reservations resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    #[serde(rename = "listingTitle", default)]
    pub listing_title: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Listed price in the marketplace currency's minor units.
    #[serde(rename = "priceCents", default)]
    pub price_cents: Option<i64>,
}

impl Reservation {
    pub fn title_display(&self) -> String {
        self.listing_title
            .clone()
            .unwrap_or_else(|| format!("Listing {}", self.listing_id))
    }
}
