//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FileStore, OpenAiAnalysisAdapter, PgRemoteStore},
    config::Config,
    error::ApiError,
    web::{self, ApiDoc, AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use study_planner_core::ports::{DayAnalysisService, RemoteStore};
use study_planner_core::RemoteSync;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Local Store ---
    let local = Arc::new(FileStore::open(&config.local_store_path)?);

    // --- 3. Decide on the Remote Store, once ---
    let remote: Option<Arc<dyn RemoteStore>> = match &config.remote {
        Some(settings) => {
            let store = PgRemoteStore::connect_lazy(settings, config.remote_read_timeout)?;
            info!("Running remote store migrations...");
            match store.run_migrations().await {
                Ok(()) => info!("Remote store migrations complete."),
                Err(e) => warn!(error = %e, "Remote store migrations failed; continuing"),
            }
            let store: Arc<dyn RemoteStore> = Arc::new(store);
            Some(store)
        }
        None => {
            info!("Remote store not configured; running local-only.");
            None
        }
    };
    let sync = RemoteSync::new(remote, config.remote_read_timeout);
    info!(remote_configured = sync.is_configured(), "Sync tier ready");

    // --- 4. Initialize the Analysis Adapter ---
    let analysis: Option<Arc<dyn DayAnalysisService>> = match &config.openai_api_key {
        Some(key) => {
            let client = Client::with_config(OpenAIConfig::new().with_api_key(key));
            let adapter: Arc<dyn DayAnalysisService> = Arc::new(OpenAiAnalysisAdapter::new(
                client,
                config.analysis_model.clone(),
            ));
            Some(adapter)
        }
        None => {
            warn!("OPENAI_API_KEY not set; day analysis is disabled.");
            None
        }
    };

    // --- 5. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), local, sync.clone(), analysis));

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 6. Create the Web Router ---
    let app = Router::new()
        .merge(web::router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- 8. Let background remote writes finish ---
    info!("Waiting for pending remote writes...");
    sync.wait_idle().await;
    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for the shutdown signal");
    }
}
