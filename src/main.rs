//! Main entry point for the Creative Banana studio service

use creative_banana::{
    api,
    backend::{GeminiBackend, GenerativeBackend},
    config::{LoggingConfig, Settings},
    studio::StudioRegistry,
    AppState,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading configuration
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    init_logging(&settings.logging);

    info!("Starting Creative Banana studio service");

    // A missing credential is fatal: refuse to start
    if let Err(e) = settings.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    // One model client for the whole process
    let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiBackend::new(&settings.gemini)?);
    info!(
        text_model = %settings.gemini.text_model,
        image_model = %settings.gemini.image_model,
        "Initialized {} backend",
        backend.name()
    );

    let settings = Arc::new(settings);
    let studios = Arc::new(StudioRegistry::new(backend, settings.studio.clone()));

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        studios,
    });

    // Build the router
    let app = api::routes::create_router(app_state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
