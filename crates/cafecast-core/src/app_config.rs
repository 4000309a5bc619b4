use std::net::SocketAddr;

use crate::shops::Coordinates;

/// Where shop listings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopSourceKind {
    /// Places search + distance matrix + popularity scrape.
    Live,
    /// Static fixture, no network.
    Mock,
}

impl ShopSourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShopSourceKind::Live => "live",
            ShopSourceKind::Mock => "mock",
        }
    }
}

impl std::fmt::Display for ShopSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shop_source: ShopSourceKind,
    /// Always `Some` when `shop_source` is [`ShopSourceKind::Live`].
    pub google_maps_api_key: Option<String>,
    pub search_timeout_secs: u64,
    pub lookup_timeout_secs: u64,
    pub search_radius_m: u32,
    pub scraper_user_agent: String,
    pub default_center: Coordinates,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop_source", &self.shop_source)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .field("search_radius_m", &self.search_radius_m)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("default_center", &self.default_center)
            .finish()
    }
}
