use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct OrderConfirmation {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct LastOrder {
    pub last_ordered_shop_id: Option<String>,
}

pub(super) async fn place_order(
    State(state): State<AppState>,
    Path(shop_id): Path<String>,
) -> Json<OrderConfirmation> {
    let message = state.orders.place_order(&shop_id).await;
    Json(OrderConfirmation { message })
}

pub(super) async fn last_order(State(state): State<AppState>) -> Json<LastOrder> {
    Json(LastOrder {
        last_ordered_shop_id: state.orders.last_order().await,
    })
}
