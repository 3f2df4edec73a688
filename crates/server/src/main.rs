mod api;
mod bootstrap;
mod health;
mod listing;
mod scheduler;
mod sessions;
mod storefront;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use botanica_core::config::{AppConfig, LoadOptions};
use tokio::sync::Notify;
use tower_http::services::ServeDir;

use crate::bootstrap::Application;

fn init_logging(config: &AppConfig) {
    use botanica_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

fn app_router(app: &Application) -> Router {
    let storefront = storefront::StorefrontState::new(
        app.catalog.clone(),
        app.config.storefront.clone(),
        app.rotators.clone(),
    );
    let api = api::ApiState::new(
        app.catalog.clone(),
        app.config.storefront.clone(),
        app.config.timers.splash_tick(),
        app.sessions.clone(),
    );

    Router::new()
        .merge(storefront::router(storefront))
        .merge(api::router(api))
        .merge(health::router(app.catalog.clone()))
        .nest_service("/assets", ServeDir::new(&app.config.catalog.asset_dir))
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let mut app = bootstrap::bootstrap_with_config(config).await?;
    app.start_timers();

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let router = app_router(&app);

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        products = app.catalog.len(),
        "botanica-server started"
    );

    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { signal.notified().await })
            .await
    });

    tokio::select! {
        served = &mut server => {
            served??;
        }
        signal = wait_for_shutdown() => {
            signal?;
            tracing::info!(
                event_name = "system.server.stopping",
                correlation_id = "shutdown",
                "botanica-server stopping"
            );
            shutdown.notify_one();

            let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(served) => served??,
                Err(_) => {
                    tracing::warn!(
                        event_name = "system.server.shutdown_timeout",
                        correlation_id = "shutdown",
                        grace_secs = grace.as_secs(),
                        "in-flight requests did not drain in time"
                    );
                    server.abort();
                }
            }
        }
    }

    app.timers.stop();
    tracing::info!(
        event_name = "system.server.stopped",
        correlation_id = "shutdown",
        "botanica-server stopped"
    );

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use botanica_core::config::LoadOptions;
    use tower::ServiceExt;

    use crate::app_router;
    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn merged_router_serves_pages_api_and_health() {
        let app = bootstrap(LoadOptions::default()).await.expect("bootstrap succeeds");
        let router = app_router(&app);

        for uri in ["/", "/products", "/api/v1/products", "/health"] {
            let request = Request::builder().uri(uri).body(Body::empty()).expect("request builds");
            let response = router.clone().oneshot(request).await.expect("router responds");
            assert_eq!(response.status(), StatusCode::OK, "{uri} should respond");
        }
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let app = bootstrap(LoadOptions::default()).await.expect("bootstrap succeeds");
        let request = Request::builder()
            .uri("/assets/definitely-missing.png")
            .body(Body::empty())
            .expect("request builds");

        let response = app_router(&app).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
