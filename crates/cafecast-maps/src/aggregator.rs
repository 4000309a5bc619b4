//! Nearby-shop listing assembled from live upstreams.
//!
//! One places search produces the list; every place then gets a travel-time
//! and a popularity lookup. All lookups of a listing run concurrently and are
//! joined with `join_all`, which keeps input order, so the i-th result of each
//! batch belongs to the i-th place.
//!
//! Only the places search can fail a listing. Lookups that error, time out, or
//! come back empty turn into [`UNAVAILABLE`] for that one field.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cafecast_core::{format_busyness, Coordinates, ShopDetail, ShopSummary, UNAVAILABLE};
use futures::future::join_all;
use tokio::sync::RwLock;

use crate::error::MapsError;
use crate::places::GoogleMapsClient;
use crate::provider::{PopularityProvider, ShopQuery, ShopSource, TravelTimeProvider};

/// Live [`ShopSource`]: places search plus per-place enrichment.
pub struct ShopAggregator {
    places: Arc<GoogleMapsClient>,
    travel: Arc<dyn TravelTimeProvider>,
    popularity: Arc<dyn PopularityProvider>,
    radius_m: u32,
    lookup_timeout: Duration,
    /// Most recent listing, so detail lookups can resolve `place_<n>` ids.
    last_listing: RwLock<Vec<ShopSummary>>,
}

impl ShopAggregator {
    /// Uses `places` for both the search and travel times. Every enrichment
    /// lookup is bounded by [`GoogleMapsClient::lookup_timeout`].
    #[must_use]
    pub fn new(
        places: Arc<GoogleMapsClient>,
        popularity: Arc<dyn PopularityProvider>,
        radius_m: u32,
    ) -> Self {
        let travel: Arc<dyn TravelTimeProvider> = places.clone();
        let lookup_timeout = places.lookup_timeout();
        Self {
            places,
            travel,
            popularity,
            radius_m,
            lookup_timeout,
            last_listing: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_travel_time_provider(mut self, travel: Arc<dyn TravelTimeProvider>) -> Self {
        self.travel = travel;
        self
    }

    /// Runs the search and enrichment, and remembers the result.
    ///
    /// # Errors
    ///
    /// Propagates any [`MapsError`] from the places search. Enrichment
    /// failures never surface here.
    pub async fn nearby_shops(&self, query: &ShopQuery) -> Result<Vec<ShopSummary>, MapsError> {
        let places = self
            .places
            .nearby_search(query.center, &query.keyword, self.radius_m)
            .await?;

        let travel_lookups = places.iter().map(|place| {
            fetch_travel_time(
                self.travel.as_ref(),
                query.center,
                place.coordinates(),
                self.lookup_timeout,
            )
        });
        let popularity_lookups = places.iter().map(|place| {
            fetch_busyness(
                self.popularity.as_ref(),
                place.popularity_query(),
                self.lookup_timeout,
            )
        });

        let (travel_times, busyness) =
            tokio::join!(join_all(travel_lookups), join_all(popularity_lookups));

        let shops: Vec<ShopSummary> = places
            .into_iter()
            .zip(travel_times)
            .zip(busyness)
            .enumerate()
            .map(|(i, ((place, round_trip), busyness))| ShopSummary {
                id: format!("place_{i}"),
                address: place.address().to_owned(),
                name: place.name,
                busyness,
                round_trip,
                can_order: true,
            })
            .collect();

        let degraded = shops
            .iter()
            .filter(|s| s.busyness == UNAVAILABLE || s.round_trip == UNAVAILABLE)
            .count();
        tracing::debug!(
            location = %query.center.to_query_value(),
            count = shops.len(),
            degraded,
            "assembled nearby shop listing"
        );

        *self.last_listing.write().await = shops.clone();
        Ok(shops)
    }
}

#[async_trait]
impl ShopSource for ShopAggregator {
    async fn list_shops(&self, query: &ShopQuery) -> Result<Vec<ShopSummary>, MapsError> {
        self.nearby_shops(query).await
    }

    async fn shop_detail(&self, shop_id: &str) -> Option<ShopDetail> {
        self.last_listing
            .read()
            .await
            .iter()
            .find(|s| s.id == shop_id)
            .map(ShopSummary::detail)
    }
}

/// Travel time from `origin` to `destination`, or [`UNAVAILABLE`].
///
/// A missing destination, an upstream error, an empty answer, and a timeout
/// all produce the marker.
pub async fn fetch_travel_time(
    provider: &dyn TravelTimeProvider,
    origin: Coordinates,
    destination: Option<Coordinates>,
    timeout: Duration,
) -> String {
    let Some(destination) = destination else {
        return UNAVAILABLE.to_string();
    };

    match tokio::time::timeout(timeout, provider.travel_time(origin, destination)).await {
        Ok(Ok(Some(text))) => text,
        Ok(Ok(None)) => {
            tracing::debug!(
                destination = %destination.to_query_value(),
                "no travel time for destination"
            );
            UNAVAILABLE.to_string()
        }
        Ok(Err(e)) => {
            tracing::warn!(
                destination = %destination.to_query_value(),
                error = %e,
                "travel time lookup failed"
            );
            UNAVAILABLE.to_string()
        }
        Err(_) => {
            tracing::warn!(
                destination = %destination.to_query_value(),
                timeout_secs = timeout.as_secs_f64(),
                "travel time lookup timed out"
            );
            UNAVAILABLE.to_string()
        }
    }
}

/// Busyness for the place described by `query`, as `"<n>%"` or [`UNAVAILABLE`].
pub async fn fetch_busyness(
    provider: &dyn PopularityProvider,
    query: String,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, provider.current_popularity(&query)).await {
        Ok(Ok(popularity)) => format_busyness(popularity),
        Ok(Err(e)) => {
            tracing::warn!(place = %query, error = %e, "popularity lookup failed");
            UNAVAILABLE.to_string()
        }
        Err(_) => {
            tracing::warn!(
                place = %query,
                timeout_secs = timeout.as_secs_f64(),
                "popularity lookup timed out"
            );
            UNAVAILABLE.to_string()
        }
    }
}
