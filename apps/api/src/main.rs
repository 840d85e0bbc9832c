mod advice;
mod config;
mod errors;
mod routes;
mod state;
mod watsonx;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::AdviceService;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::watsonx::{iam::IamTokenSource, WatsonxClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing or empty credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the watsonx chat client behind the IAM token source
    let iam = IamTokenSource::new(config.watsonx_api_key.clone());
    let model = WatsonxClient::new(
        config.watsonx_url.clone(),
        config.model_id.clone(),
        config.watsonx_project_id.clone(),
        iam,
    );
    info!("watsonx client initialized (model: {})", config.model_id);

    let advice = AdviceService::new(Arc::new(model));

    // Build app state
    let state = AppState {
        advice,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
