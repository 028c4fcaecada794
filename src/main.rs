//! quickclip - An ephemeral clipboard service

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickclip::api::{cors_layer, create_router, AppState};
use quickclip::store::{self, Backend};
use quickclip::tasks::{spawn_sweeper, DEFAULT_SWEEP_INTERVAL};
use quickclip::Config;

/// Main entry point for the clipboard server.
///
/// # Startup Sequence
/// 1. Load `.env` if present and initialize tracing
/// 2. Load configuration from environment variables
/// 3. Connect to the store and run the write-then-read self-test
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
///
/// Any failure before the server starts listening is fatal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickclip=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting quickclip");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: port={}, backend_url={}, allowed_origin={}",
        config.server_port, config.backend_url, config.allowed_origin
    );

    let backend = Backend::connect(&config.redis_url)
        .await
        .context("failed to connect to store")?;
    let sweeper = match &backend {
        Backend::Memory(memory) => Some(spawn_sweeper(memory.clone(), DEFAULT_SWEEP_INTERVAL)),
        Backend::Redis(_) => None,
    };
    let shared = backend.into_shared();

    let probe = store::self_test(shared.as_ref())
        .await
        .context("store self-test failed")?;
    info!("Store connected successfully, self-test value: {}", probe);

    let cors = cors_layer(&config.allowed_origin)
        .with_context(|| format!("invalid FRONTEND_URL {:?}", config.allowed_origin))?;
    let app = create_router(AppState::new(shared), cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server running at: {}", config.backend_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task if one is running.
async fn shutdown_signal(sweeper: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        warn!("Expiry sweep aborted");
    }
}
