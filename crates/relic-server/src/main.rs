mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use relic_archive::Archive;

use crate::config::{EmojiSource, ServerConfig};
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relic_server=debug,relic_render=info,relic_archive=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Set RELIC_ARCHIVE_PATH to the exported workspace directory");
            eprintln!("       (in the environment or a .env file) and restart.");
            std::process::exit(1);
        }
    };

    let archive = Archive::open(&config.archive_path)?;
    match &config.emoji {
        EmojiSource::Bundled => info!("Using bundled emoji table"),
        EmojiSource::File(path) => info!("Using emoji table at {}", path.display()),
    }

    let state = AppState {
        archive,
        emoji: config.emoji.clone(),
        render: Arc::new(config.render.clone()),
    };
    let app = routes::router(state);

    // Host may be a name such as "localhost"
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("{} viewer listening on http://{}", config.render.workspace_name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
