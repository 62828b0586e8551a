mod config;

use std::sync::Arc;

use tracing::info;

use roster_api::files::ensure_images_dir;
use roster_api::{AppState, AppStateInner};
use roster_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_server=debug,roster_api=debug,roster_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Database::open(&config.db_path)?;
    if config.reset_db {
        info!("ROSTER_RESET_DB set, reinitializing {}", config.db_path.display());
        db.initialize()?;
    } else if db.count_users()? == 0 {
        info!("Empty directory, provisioning bootstrap admin");
        db.initialize()?;
    }

    ensure_images_dir(&config.images_dir).await?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        images_dir: config.images_dir.clone(),
    });
    let app = roster_api::router(state);

    let addr = config.addr()?;
    info!("Roster server listening on {}", addr);
    info!("Uploads go to {}", config.images_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Roster server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
