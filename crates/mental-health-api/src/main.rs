use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;

use mental_health_api::config::{Credentials, Settings};
use mental_health_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,mental_health_api=debug".to_string()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .init();

    info!("🚀 Starting Mental Health Agent API...");

    // Refuse to start without both API keys
    let credentials = Credentials::from_env()?;
    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::from_settings(settings, &credentials)?;
    let app = build_router(state);

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
