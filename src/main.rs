use std::sync::Arc;

use augur::config::Config;
use augur::services::{Analyzer, BarSource, JsonFileSource};
use augur::{api, AppState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Augur server on {}:{}", config.host, config.port);

    let analyzer = Arc::new(Analyzer::new(config.analysis.clone())?);

    if !config.data_dir.is_dir() {
        warn!(
            "Data directory {} does not exist; every ticker will report no data",
            config.data_dir.display()
        );
    }
    let source: Arc<dyn BarSource> = Arc::new(
        JsonFileSource::new(config.data_dir.clone()).with_lookback_days(config.lookback_days),
    );
    info!(
        "Reading bar history from {} ({} day lookback)",
        config.data_dir.display(),
        config.lookback_days
    );

    let state = AppState {
        config: config.clone(),
        analyzer,
        source,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
