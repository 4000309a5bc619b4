//! Live busyness scraped from the map-search endpoint behind the search page.
//!
//! There is no API for this; the request replays what the maps web client
//! sends (`tbm=map` plus a fixed `pb` viewport blob) under a browser
//! user-agent and digs the number out of the response. The `parse` module
//! documents the response layout.

mod parse;

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::MapsError;
use crate::places::classify_send_error;
use crate::provider::PopularityProvider;

const DEFAULT_SEARCH_URL: &str = "http://www.google.com/search";

/// Characters `q` leaves unescaped, matching form encoding of the web client.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Viewport and feature flags captured from a browser session. Already
/// percent-encoded; appended verbatim.
const MAP_SEARCH_PB: &str = concat!(
    "!4m12!1m3!1d4005.9771522653964!2d-122.42072974863942!3d37.8077459796541!2m3!1f0!2f0!3f0!3m2!1i1125!2i976",
    "!4f13.1!7i20!10b1!12m6!2m3!5m1!6e2!20e3!10b1!16b1!19m3!2m2!1i392!2i106!20m61!2m2!1i203!2i100!3m2!2i4!5b1",
    "!6m6!1m2!1i86!2i86!1m2!1i408!2i200!7m46!1m3!1e1!2b0!3e3!1m3!1e2!2b1!3e2!1m3!1e2!2b0!3e3!1m3!1e3!2b0!3e3!",
    "1m3!1e4!2b0!3e3!1m3!1e8!2b0!3e3!1m3!1e3!2b1!3e2!1m3!1e9!2b1!3e2!1m3!1e10!2b0!3e3!1m3!1e10!2b1!3e2!1m3!1e",
    "10!2b0!3e4!2b1!4b1!9b0!22m6!1sa9fVWea_MsX8adX8j8AE%3A1!2zMWk6Mix0OjExODg3LGU6MSxwOmE5ZlZXZWFfTXNYOGFkWDh",
    "qOEFFOjE!7e81!12e3!17sa9fVWea_MsX8adX8j8AE%3A564!18e15!24m15!2b1!5m4!2b1!3b1!5b1!6b1!10m1!8e3!17b1!24b1!",
    "25b1!26b1!30m1!2b1!36b1!26m3!2m2!1i80!2i92!30m28!1m6!1m2!1i0!2i0!2m2!1i458!2i976!1m6!1m2!1i1075!2i0!2m2!",
    "1i1125!2i976!1m6!1m2!1i0!2i0!2m2!1i1125!2i20!1m6!1m2!1i0!2i956!2m2!1i1125!2i976!37m1!1e81!42b1!47m0!49m1",
    "!3b1",
);

/// Scrapes current popularity for a place from the map-search endpoint.
pub struct PopularityScraper {
    client: Client,
    search_url: String,
    timeout: Duration,
}

impl PopularityScraper {
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, MapsError> {
        Self::with_search_url(timeout_secs, user_agent, DEFAULT_SEARCH_URL)
    }

    /// Points the scraper at another search URL (wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_search_url(
        timeout_secs: u64,
        user_agent: &str,
        search_url: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            search_url: search_url.trim_end_matches(['/', '?']).to_owned(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Full request URL for `query`.
    ///
    /// Built by hand: `pb` is pre-encoded and must not be encoded twice.
    fn request_url(&self, query: &str) -> String {
        format!(
            "{}?tbm=map&tch=1&hl=en&q={}&pb={MAP_SEARCH_PB}",
            self.search_url,
            quote_plus(query),
        )
    }

    /// Fetches and unpacks the map-search payload for `query`.
    async fn fetch_payload(&self, query: &str) -> Result<serde_json::Value, MapsError> {
        let url = self.request_url(query);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.search_url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(e, self.timeout))?;
        parse::extract_payload(&body)
    }
}

#[async_trait]
impl PopularityProvider for PopularityScraper {
    async fn current_popularity(&self, query: &str) -> Result<Option<u8>, MapsError> {
        let payload = self.fetch_payload(query).await?;
        let popularity = parse::current_popularity(&payload);
        tracing::trace!(query, ?popularity, "scraped popularity");
        Ok(popularity)
    }
}

/// Form-style encoding: spaces become `+`, everything outside
/// `[A-Za-z0-9_.~-]` is percent-escaped.
fn quote_plus(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}
