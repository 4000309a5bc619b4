//! Fixed shop data for running without credentials or network access.

use async_trait::async_trait;
use cafecast_core::{ShopDetail, ShopSummary};

use crate::error::MapsError;
use crate::provider::{ShopQuery, ShopSource};

struct MockShop {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    busyness: &'static str,
    round_trip: &'static str,
    can_order: bool,
}

const MOCK_SHOPS: [MockShop; 3] = [
    MockShop {
        id: "shop1",
        name: "Brew Point",
        address: "123 Bean St",
        busyness: "10%",
        round_trip: "15 mins",
        can_order: true,
    },
    MockShop {
        id: "shop2",
        name: "Café Nova",
        address: "456 Roast Rd",
        busyness: "2%",
        round_trip: "10 mins",
        can_order: false,
    },
    MockShop {
        id: "shop3",
        name: "Bean Scene",
        address: "789 Java Ave",
        busyness: "3%",
        round_trip: "5 mins",
        can_order: true,
    },
];

impl MockShop {
    fn summary(&self) -> ShopSummary {
        ShopSummary {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            address: self.address.to_owned(),
            busyness: self.busyness.to_owned(),
            round_trip: self.round_trip.to_owned(),
            can_order: self.can_order,
        }
    }
}

/// [`ShopSource`] backed by a hard-coded list. Ignores the query location.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockShopSource;

#[async_trait]
impl ShopSource for MockShopSource {
    async fn list_shops(&self, _query: &ShopQuery) -> Result<Vec<ShopSummary>, MapsError> {
        Ok(MOCK_SHOPS.iter().map(MockShop::summary).collect())
    }

    async fn shop_detail(&self, shop_id: &str) -> Option<ShopDetail> {
        MOCK_SHOPS
            .iter()
            .find(|s| s.id == shop_id)
            .map(|s| s.summary().detail())
    }
}
