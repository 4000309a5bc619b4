use crate::app_config::{AppConfig, ShopSourceKind};
use crate::shops::Coordinates;
use crate::ConfigError;

const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_1) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.98 Safari/537.36";

/// Five miles, in meters.
const DEFAULT_SEARCH_RADIUS_M: &str = "8046";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
/// With the live shop source selected, a missing `GOOGLE_MAPS_API_KEY` is an error
/// here rather than at the first request.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parses and validates configuration through `lookup`, so tests can feed a
/// plain map instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let bind_addr = or_default("CAFECAST_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CAFECAST_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CAFECAST_LOG_LEVEL", "info");

    let shop_source = parse_shop_source(&or_default("CAFECAST_SHOP_SOURCE", "live"))
        .ok_or_else(|| invalid("CAFECAST_SHOP_SOURCE", "expected \"live\" or \"mock\"".into()))?;

    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if shop_source == ShopSourceKind::Live && google_maps_api_key.is_none() {
        return Err(ConfigError::MissingEnvVar("GOOGLE_MAPS_API_KEY".to_string()));
    }

    let search_timeout_secs = parse_u64("CAFECAST_SEARCH_TIMEOUT_SECS", "10")?;
    let lookup_timeout_secs = parse_u64("CAFECAST_LOOKUP_TIMEOUT_SECS", "5")?;
    let search_radius_m = or_default("CAFECAST_SEARCH_RADIUS_M", DEFAULT_SEARCH_RADIUS_M)
        .parse::<u32>()
        .map_err(|e| invalid("CAFECAST_SEARCH_RADIUS_M", e.to_string()))?;
    let scraper_user_agent = or_default("CAFECAST_SCRAPER_USER_AGENT", DEFAULT_SCRAPER_USER_AGENT);

    let default_lat = parse_f64("CAFECAST_DEFAULT_LAT", "37.39325571666153")?;
    let default_lon = parse_f64("CAFECAST_DEFAULT_LON", "-122.04601320750524")?;
    if !(-90.0..=90.0).contains(&default_lat) {
        return Err(invalid("CAFECAST_DEFAULT_LAT", "latitude out of range".into()));
    }
    if !(-180.0..=180.0).contains(&default_lon) {
        return Err(invalid("CAFECAST_DEFAULT_LON", "longitude out of range".into()));
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        shop_source,
        google_maps_api_key,
        search_timeout_secs,
        lookup_timeout_secs,
        search_radius_m,
        scraper_user_agent,
        default_center: Coordinates::new(default_lat, default_lon),
    })
}

fn parse_shop_source(s: &str) -> Option<ShopSourceKind> {
    match s.trim().to_ascii_lowercase().as_str() {
        "live" => Some(ShopSourceKind::Live),
        "mock" => Some(ShopSourceKind::Mock),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
