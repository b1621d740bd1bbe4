use crate::config::Config;
use anyhow::Context;
use axum::Router;
use axum::http::header::HeaderValue;
use http::{Method, header};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
mod routers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let cors = cors_layer(config.allowed_origin.as_deref())?;

    // Create shared state
    let shared_state = Arc::new(AppState {
        config: Arc::new(config),
    });

    // Build the app router
    let app = create_router(&shared_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);
    log::info!(
        "Supported algorithms: {}",
        crate::engine::Algorithm::supported_ids().join(", ")
    );

    axum::serve(listener, app)
        .await
        .context("Error running the server")
}

fn cors_layer(allowed_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);

    Ok(match allowed_origin {
        Some(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin {}", origin))?,
        ),
        None => cors.allow_origin(Any),
    })
}

// Create Router
pub fn create_router(shared_state: &Arc<AppState>) -> Router {
    Router::new()
        .merge(routers::algorithms::router(shared_state.clone()))
        .fallback(|| async { error::Error::NotFound })
}
