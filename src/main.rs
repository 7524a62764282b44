use std::sync::Arc;

use bluenode_onboarding::config::ServiceConfig;
use bluenode_onboarding::onboarding::engine::FormEngine;
use bluenode_onboarding::onboarding::routes::{OnboardingRouteState, onboarding_routes};
use bluenode_onboarding::store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("Bluenode onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API:   http://0.0.0.0:{}/api/onboarding", config.port);
    eprintln!("   Relay: {}", config.relay.endpoint);

    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(FormEngine::new(store, config.relay.clone()));
    let app = onboarding_routes(OnboardingRouteState { engine });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Onboarding server started");
    axum::serve(listener, app).await?;

    Ok(())
}
