//! Shop records shared by the lookup crate and the HTTP surface.

use serde::{Deserialize, Serialize};

/// Placeholder rendered when busyness or travel time could not be obtained.
pub const UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `"<lat>,<lon>"`, the form the mapping APIs accept for a single point.
    #[must_use]
    pub fn to_query_value(self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// One entry of a nearby-shop listing.
///
/// `id` is only unique within the listing it came from; live results use
/// positional ids (`place_0`, `place_1`, ...) that change between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    pub busyness: String,
    pub round_trip: String,
    pub can_order: bool,
}

impl ShopSummary {
    #[must_use]
    pub fn detail(&self) -> ShopDetail {
        ShopDetail {
            name: self.name.clone(),
            address: self.address.clone(),
            can_order: self.can_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopDetail {
    pub name: String,
    pub address: String,
    pub can_order: bool,
}

/// Formats a popularity percentage, or [`UNAVAILABLE`] when there is none.
#[must_use]
pub fn format_busyness(percent: Option<u8>) -> String {
    percent.map_or_else(|| UNAVAILABLE.to_string(), |p| format!("{p}%"))
}
