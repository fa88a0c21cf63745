use anyhow::Context;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ride_hailing::{
    app,
    config::{Config, LogFormat},
    AppState,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting Ride Hailing API ({})", config.app.environment);
    if config.is_development() {
        debug!("App config: {:?}", config.app);
    }

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port)
        .parse()
        .context("HOST/PORT do not form a socket address")?;

    let state = AppState::new(&config.database)
        .await
        .context("Failed to initialise the store")?;

    let router = app(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
