//! Companion REST API entry point.
//!
//! Binary name: `companion`
//!
//! Parses CLI arguments, initializes the database and services, then
//! serves the REST API until Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use companion_infra::sqlite::pool::default_database_url;
use companion_types::config::GenerationConfig;
use state::AppState;

#[derive(Parser)]
#[command(name = "companion", version, about = "Character chat backend")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "COMPANION_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "COMPANION_PORT", default_value_t = 8000)]
    port: u16,

    /// SQLite database URL (defaults to `sqlite://<data dir>/companion.db`).
    #[arg(long, env = "COMPANION_DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of the Ollama-style generation server.
    #[arg(long, env = "COMPANION_OLLAMA_HOST")]
    ollama_host: Option<String>,

    /// Default generation model.
    #[arg(long, env = "COMPANION_MODEL")]
    model: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "info,companion=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => {
            let data_dir =
                std::env::var("COMPANION_DATA_DIR").unwrap_or_else(|_| "data".to_string());
            tokio::fs::create_dir_all(&data_dir).await?;
            default_database_url()
        }
    };

    let mut generation = GenerationConfig::default();
    if let Some(host) = cli.ollama_host {
        generation.host = host;
    }
    if let Some(model) = cli.model {
        generation.model = model;
    }

    tracing::info!(
        database_url = %database_url,
        generation_host = %generation.host,
        model = %generation.model,
        "starting"
    );

    let state = AppState::init(&database_url, generation).await?;
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
