//! HTTP client for the Google Maps web-service APIs (places nearby search and
//! distance matrix).
//!
//! Both endpoints are authenticated with the API key as a query parameter.
//! The nearby search is the primary listing and its failures propagate; the
//! distance matrix only enriches a listing.

mod distance;
pub mod types;

use std::time::Duration;

use cafecast_core::Coordinates;
use reqwest::{Client, Url};

use crate::error::MapsError;
use types::{NearbySearchResponse, Place};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const DISTANCE_MATRIX_PATH: &str = "maps/api/distancematrix/json";

/// Place type the nearby search is restricted to.
const PLACE_TYPE: &str = "cafe";

/// Client for the places and distance-matrix APIs.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    search_timeout: Duration,
    lookup_timeout: Duration,
}

impl GoogleMapsClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        search_timeout_secs: u64,
        lookup_timeout_secs: u64,
    ) -> Result<Self, MapsError> {
        Self::with_base_url(
            api_key,
            search_timeout_secs,
            lookup_timeout_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`MapsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        search_timeout_secs: u64,
        lookup_timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cafecast/0.1")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MapsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            search_timeout: Duration::from_secs(search_timeout_secs),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
        })
    }

    /// Per-request bound for distance-matrix lookups. The aggregator applies
    /// the same bound to every enrichment lookup.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Open places matching `keyword` within `radius_m` meters of `center`,
    /// in the order the API returned them.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Timeout`] if the search exceeds the search timeout.
    /// - [`MapsError::Http`] on network failure.
    /// - [`MapsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`MapsError::Deserialize`] if the body is not the expected JSON.
    /// - [`MapsError::ApiStatus`] if the envelope status is not `OK`/`ZERO_RESULTS`.
    pub async fn nearby_search(
        &self,
        center: Coordinates,
        keyword: &str,
        radius_m: u32,
    ) -> Result<Vec<Place>, MapsError> {
        let location = center.to_query_value();
        let radius = radius_m.to_string();
        let url = self.endpoint(
            NEARBY_SEARCH_PATH,
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", PLACE_TYPE),
                ("keyword", keyword),
                ("opennow", "true"),
            ],
        )?;

        let body = self.get_text(url, self.search_timeout).await?;
        let response: NearbySearchResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
                context: format!("nearby search around {location}"),
                source: e,
            })?;

        if !response.is_success() {
            return Err(MapsError::ApiStatus {
                message: response
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
                status: response.status,
            });
        }

        tracing::debug!(
            location = %location,
            keyword,
            count = response.results.len(),
            "nearby search returned places"
        );
        Ok(response.results)
    }

    /// Builds `<base>/<path>?<params>&key=<api key>`.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, MapsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| MapsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    /// GETs `url` with a per-request timeout and returns the body of a 2xx
    /// response.
    async fn get_text(&self, url: Url, timeout: Duration) -> Result<String, MapsError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_send_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_key(response.url()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| classify_send_error(e, timeout))
    }
}

pub(crate) fn classify_send_error(err: reqwest::Error, timeout: Duration) -> MapsError {
    if err.is_timeout() {
        MapsError::Timeout {
            secs: timeout.as_secs(),
        }
    } else {
        MapsError::Http(err.without_url())
    }
}

/// Drops the query string so the API key never ends up in logs or errors.
fn redact_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
