mod api;
mod middleware;
mod orders;

use std::sync::Arc;

use anyhow::Context;
use cafecast_core::{AppConfig, ShopSourceKind};
use cafecast_maps::{
    GoogleMapsClient, MockShopSource, PopularityScraper, ShopAggregator, ShopSource,
};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cafecast_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let shops = build_shop_source(&config)?;
    let app = build_app(AppState::new(
        shops,
        config.shop_source,
        config.default_center,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        shop_source = %config.shop_source,
        "cafecast server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_shop_source(config: &AppConfig) -> anyhow::Result<Arc<dyn ShopSource>> {
    match config.shop_source {
        ShopSourceKind::Mock => Ok(Arc::new(MockShopSource)),
        ShopSourceKind::Live => {
            let api_key = config
                .google_maps_api_key
                .as_deref()
                .context("GOOGLE_MAPS_API_KEY is required for the live shop source")?;
            let places = GoogleMapsClient::new(
                api_key,
                config.search_timeout_secs,
                config.lookup_timeout_secs,
            )?;
            let popularity =
                PopularityScraper::new(config.lookup_timeout_secs, &config.scraper_user_agent)?;
            Ok(Arc::new(ShopAggregator::new(
                Arc::new(places),
                Arc::new(popularity),
                config.search_radius_m,
            )))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
