mod orders;
mod shops;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use cafecast_core::{Coordinates, ShopSourceKind};
use cafecast_maps::ShopSource;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};
use crate::orders::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub shops: Arc<dyn ShopSource>,
    pub orders: OrderStore,
    pub source_kind: ShopSourceKind,
    /// Used when a listing request omits `lat`/`lon`.
    pub default_center: Coordinates,
}

impl AppState {
    #[must_use]
    pub fn new(
        shops: Arc<dyn ShopSource>,
        source_kind: ShopSourceKind,
        default_center: Coordinates,
    ) -> Self {
        Self {
            shops,
            orders: OrderStore::new(),
            source_kind,
            default_center,
        }
    }
}

/// Error response. Serialized as `{"error": "<message>"}`; the code picks the
/// status.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    shop_source: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/coffee_shops", get(shops::list_coffee_shops))
        .route("/api/coffee_shops/last_order", get(orders::last_order))
        .route("/api/coffee_shops/{shop_id}", get(shops::get_coffee_shop))
        .route("/api/coffee_shops/{shop_id}/order", post(orders::place_order))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        shop_source: state.source_kind.as_str(),
    })
}
