// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::aggregator::AggregateOptions;
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_app_config, load_widgets_config};
use crate::infrastructure::http_repository::HttpMetricsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;
    let widgets_config = load_widgets_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpMetricsRepository::new(app_config.api_base.clone()));

    // Create service (application layer)
    let dashboard_service = DashboardService::new(
        repository,
        widgets_config,
        AggregateOptions {
            zero_fill_missing: app_config.zero_fill_missing,
        },
    );

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards/:page", get(get_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = app_config.listen_addr.parse()?;
    println!("Starting urbanpulse-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
