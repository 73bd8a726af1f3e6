use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, reload};

use agent_dispatch_api::api::{self, SharedStore};
use agent_dispatch_api::config::AppConfig;
use agent_dispatch_api::domain::repositories::AssignmentStore;
use agent_dispatch_api::infrastructure::repositories::InMemoryAssignmentStore;
use agent_dispatch_api::infrastructure::seed::seed_agents;

#[tokio::main]
async fn main() {
    // Initialize tracing before config so defaulted variables are reported;
    // the level is swapped to LOG_LEVEL once it is known
    let (level_filter, level_handle) = reload::Layer::new(LevelFilter::INFO);
    tracing_subscriber::registry()
        .with(level_filter)
        .with(fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    let level = LevelFilter::from_level(config.log_level);
    if let Err(e) = level_handle.modify(|filter| *filter = level) {
        tracing::warn!("Could not apply LOG_LEVEL {}: {}", config.log_level, e);
    }

    tracing::info!(
        idle_selection = %config.idle_selection,
        skills = ?config.skills.skills(),
        "Configuration loaded"
    );

    // Set up the store and seed the roster
    let store = InMemoryAssignmentStore::new(config.skills.clone(), config.idle_selection);
    tracing::info!("Registering seed agents...");
    let agent_ids = store
        .register_agents(seed_agents())
        .await
        .expect("Failed to register seed agents");
    tracing::info!("Registered {} seed agents", agent_ids.len());

    let store: SharedStore = Arc::new(store);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(store)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
