pub mod aggregator;
pub mod error;
pub mod json_path;
pub mod mock;
pub mod places;
pub mod popularity;
pub mod provider;

pub use aggregator::{fetch_busyness, fetch_travel_time, ShopAggregator};
pub use error::MapsError;
pub use json_path::{try_index, try_path, PathStep};
pub use mock::MockShopSource;
pub use places::GoogleMapsClient;
pub use popularity::PopularityScraper;
pub use provider::{PopularityProvider, ShopQuery, ShopSource, TravelTimeProvider};
