use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use cafecast_core::{Coordinates, ShopDetail, ShopSummary};
use cafecast_maps::ShopQuery;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ListShopsParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub keyword: Option<String>,
}

impl ListShopsParams {
    fn into_query(self, default_center: Coordinates) -> Result<ShopQuery, ApiError> {
        let lat = self.lat.unwrap_or(default_center.lat);
        let lon = self.lon.unwrap_or(default_center.lon);
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ApiError::new("bad_request", "lat must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ApiError::new("bad_request", "lon must be between -180 and 180"));
        }

        let query = ShopQuery::new(Coordinates::new(lat, lon));
        Ok(match self.keyword.filter(|k| !k.trim().is_empty()) {
            Some(keyword) => query.with_keyword(keyword),
            None => query,
        })
    }
}

pub(super) async fn list_coffee_shops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<ListShopsParams>, QueryRejection>,
) -> Result<Json<Vec<ShopSummary>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::new("bad_request", e.body_text()))?;
    let query = params.into_query(state.default_center)?;

    let shops = state.shops.list_shops(&query).await.map_err(|e| {
        tracing::error!(
            request_id = %req_id.0,
            location = %query.center.to_query_value(),
            error = %e,
            "shop listing failed"
        );
        ApiError::new("upstream_error", e.to_string())
    })?;

    Ok(Json(shops))
}

pub(super) async fn get_coffee_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<String>,
) -> Result<Json<ShopDetail>, ApiError> {
    state
        .shops
        .shop_detail(&shop_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::new("not_found", "Shop not found"))
}
