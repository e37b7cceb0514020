#![forbid(unsafe_code)]
use anyhow::Result;
use appointment_backend::{config::Settings, router, AppointmentApp};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> Result<()> {
    // loaded before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = dotenv {
        warn!("No .env file loaded: {}", e);
    }

    let settings = Settings::from_env()?;
    info!("Starting server with {:?}", settings.mail);

    let app = Arc::new(AppointmentApp::from_settings(&settings.mail));

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.bind_address, settings.port))
            .await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
