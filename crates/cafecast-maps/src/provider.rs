//! Seams between the aggregator and the services it talks to.
//!
//! The live implementations are [`crate::GoogleMapsClient`] (travel time) and
//! [`crate::PopularityScraper`] (busyness); tests substitute stubs.

use async_trait::async_trait;
use cafecast_core::{Coordinates, ShopDetail, ShopSummary};

use crate::error::MapsError;

/// Estimated travel duration between two points.
#[async_trait]
pub trait TravelTimeProvider: Send + Sync {
    /// Human-readable duration such as `"15 mins"`, or `None` when the
    /// upstream has no answer.
    async fn travel_time(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<String>, MapsError>;
}

/// Live occupancy for a place identified by free text (name plus address).
#[async_trait]
pub trait PopularityProvider: Send + Sync {
    /// Current popularity as a 0-100 percentage, or `None` when the place
    /// has no live data.
    async fn current_popularity(&self, query: &str) -> Result<Option<u8>, MapsError>;
}

/// Parameters of a nearby-shop listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopQuery {
    pub center: Coordinates,
    /// Category keyword passed to the places search (`coffee` by default).
    pub keyword: String,
}

impl ShopQuery {
    pub const DEFAULT_KEYWORD: &'static str = "coffee";

    #[must_use]
    pub fn new(center: Coordinates) -> Self {
        Self {
            center,
            keyword: Self::DEFAULT_KEYWORD.to_string(),
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }
}

/// Backing store for the shop endpoints: the live aggregator or the fixture.
#[async_trait]
pub trait ShopSource: Send + Sync {
    /// Lists shops around `query.center`.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError`] only when the primary listing itself cannot be
    /// produced; enrichment failures are folded into the summaries.
    async fn list_shops(&self, query: &ShopQuery) -> Result<Vec<ShopSummary>, MapsError>;

    /// Looks a shop up by the id it was listed under. `None` means not found.
    async fn shop_detail(&self, shop_id: &str) -> Option<ShopDetail>;
}
