//! Simulated ordering: remembers the last shop an order was placed at.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Process-wide last-order slot, shared through the router state.
///
/// Every order overwrites the slot; concurrent orders resolve last write wins.
/// Shop ids are not validated.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    last_order: Arc<RwLock<Option<String>>>,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an order and returns the confirmation message.
    pub async fn place_order(&self, shop_id: &str) -> String {
        *self.last_order.write().await = Some(shop_id.to_owned());
        tracing::info!(shop_id, "order placed");
        format!("Order placed at {shop_id}")
    }

    pub async fn last_order(&self) -> Option<String> {
        self.last_order.read().await.clone()
    }
}
