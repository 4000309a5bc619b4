//! Wire types for the places nearby-search response.
//!
//! Only the fields the aggregator reads are modelled; everything else in the
//! payload is ignored.

use cafecast_core::Coordinates;
use serde::Deserialize;

/// Top-level nearby-search envelope. `status` is `"OK"` or `"ZERO_RESULTS"`
/// on success; anything else comes with an optional `error_message`.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<Place>,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl NearbySearchResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status.as_str(), "OK" | "ZERO_RESULTS")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Place {
    pub const UNKNOWN_ADDRESS: &'static str = "Unknown address";

    #[must_use]
    pub fn address(&self) -> &str {
        self.vicinity.as_deref().unwrap_or(Self::UNKNOWN_ADDRESS)
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.geometry
            .as_ref()
            .and_then(|g| g.location)
            .map(|l| Coordinates::new(l.lat, l.lng))
    }

    /// Free-text query the popularity scraper searches for: `"(<name>) <address>"`.
    #[must_use]
    pub fn popularity_query(&self) -> String {
        format!("({}) {}", self.name, self.address())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Absent on some results that only carry a viewport.
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_without_vicinity_uses_placeholder_address() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "name": "Blue Bottle",
            "geometry": {"location": {"lat": 37.0, "lng": -122.0}}
        }))
        .expect("place");
        assert_eq!(place.address(), "Unknown address");
        assert_eq!(place.popularity_query(), "(Blue Bottle) Unknown address");
        assert_eq!(place.coordinates(), Some(Coordinates::new(37.0, -122.0)));
    }

    #[test]
    fn place_without_geometry_has_no_coordinates() {
        let place: Place =
            serde_json::from_value(serde_json::json!({"name": "Ghost Cafe", "vicinity": "Nowhere"}))
                .expect("place");
        assert!(place.coordinates().is_none());
    }

    #[test]
    fn geometry_without_location_has_no_coordinates() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "name": "Viewport Only",
            "geometry": {"viewport": {}}
        }))
        .expect("place");
        assert!(place.coordinates().is_none());

        let place: Place = serde_json::from_value(serde_json::json!({
            "name": "Null Location",
            "geometry": {"location": null}
        }))
        .expect("place");
        assert!(place.coordinates().is_none());
    }

    #[test]
    fn response_status_classification() {
        let ok: NearbySearchResponse =
            serde_json::from_value(serde_json::json!({"status": "ZERO_RESULTS"})).unwrap();
        assert!(ok.is_success());
        assert!(ok.results.is_empty());

        let denied: NearbySearchResponse = serde_json::from_value(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .unwrap();
        assert!(!denied.is_success());
    }
}
