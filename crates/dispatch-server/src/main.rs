//! Medical-delivery dispatch planner HTTP service.

use anyhow::Result;
use axum::middleware;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dispatch_server::api;
use dispatch_server::config::Config;
use dispatch_server::ilp::IlpClient;
use dispatch_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dispatch_server=debug".parse()?),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Starting dispatch planner, ILP endpoint {}", config.ilp_endpoint);

    let ilp = Arc::new(IlpClient::new(config.ilp_endpoint.clone()));
    let state = Arc::new(AppState::new(config.clone(), ilp));

    let app = api::create_router()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(middleware::from_fn(api::ensure_request_id))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
