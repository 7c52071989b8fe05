use solace::api::{self, app_state::AppState};
use solace::config::loader::ConfigLoader;
use solace::observability::{
    ObservabilityState, create_observability_router, init_tracing, metrics_middleware,
};
use solace::services::{create_counselor_service, create_earnings_service, create_session_service};
use solace::services::events::EventBus;
use solace::services::session::SessionStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("solace");

    info!("Starting Solace...");

    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    let session_store = Arc::new(SessionStore::new(config.counselor.max_transcript_len));
    info!("Session store initialized");

    let events = EventBus::new(config.session.event_channel_capacity);
    info!("Event bus initialized");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
    ));
    let metrics = observability_state.metrics.clone();

    let session_service = create_session_service(session_store.clone());
    info!("Session service initialized");

    let counselor_service = create_counselor_service(
        session_store.clone(),
        events.clone(),
        metrics.clone(),
        config.counselor.clone(),
    );
    info!("Counselor service initialized");

    let earnings_service = create_earnings_service();
    info!("Earnings service initialized");

    let app_state = AppState::new(
        config.clone(),
        session_store,
        session_service,
        counselor_service,
        earnings_service,
        events,
        metrics,
    );
    info!("Application state created");

    let api_router = api::create_router(app_state);
    let obs_state = observability_state.clone();
    let router = create_observability_router(observability_state)
        .merge(api_router)
        .layer(axum::middleware::from_fn(move |req, next| {
            metrics_middleware(req, next, obs_state.clone())
        }));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
