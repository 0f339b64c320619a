mod api;
mod dashboard;
mod middleware;
mod page;
mod templates;

use std::sync::Arc;
use std::time::Duration;

use mentiondb_backend::{BackendClient, MentionStore};
use mentiondb_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    dashboard::Dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mentiondb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = build_store(&config)?;
    tracing::info!(
        env = %config.env,
        backend = store.mode(),
        table = %config.table,
        "starting mentions dashboard"
    );

    let dashboard = Arc::new(Dashboard::new(store));
    // Initial fetch runs in the background; the page shows "loading" meanwhile.
    drop(dashboard.mount().await);

    let app = build_app(AppState { dashboard });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_store(config: &AppConfig) -> anyhow::Result<MentionStore> {
    match config.backend() {
        Some(backend) => Ok(MentionStore::Live(BackendClient::new(&backend)?)),
        None => {
            tracing::warn!(
                delay_ms = config.sample_delay_ms,
                "backend URL or key not set; serving sample mentions"
            );
            Ok(MentionStore::sample(Duration::from_millis(
                config.sample_delay_ms,
            )))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
