use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use bacheca_core::MessageService;
use bacheca_server::{config::Config, routes, seed, storage::Backend, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env().context("load configuration")?;
    info!(
        addr = %config.http_addr,
        database = %config.database_url,
        users = config.credentials.len(),
        "configuration loaded"
    );

    // Apri lo storage (SQLite con migrazioni, oppure in memoria)
    let backend = Backend::open(&config.database_url).await?;

    if let Some(csv) = &config.initial_csv {
        seed::seed_from_csv(&backend, csv)
            .await
            .context("seed messages from csv")?;
    }

    // Crea lo stato dell'applicazione condiviso
    let state = Arc::new(AppState {
        service: MessageService::new(backend.storage()),
        credentials: config.credentials.clone(),
    });
    let app = routes::router(state, config.request_timeout);

    let listener = TcpListener::bind(config.http_addr)
        .await
        .context("bind tcp listener")?;
    info!("running webserver on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    info!("webserver stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down webserver");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down webserver");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
