//! forum-server - threaded discussion service

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forum_server::api::{create_router, AppState};
use forum_server::storage::{SqliteConfig, SqliteStore};
use forum_server::Config;

#[derive(Parser, Debug)]
#[command(name = "forum-server")]
#[command(about = "Threaded forum service with materialized-path reply trees")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "FORUM_SERVER_HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "FORUM_SERVER_PORT")]
    port: Option<u16>,

    /// Path to SQLite database
    #[arg(long, env = "FORUM_DATABASE_PATH")]
    database: Option<String>,

    /// Log level
    #[arg(long, env = "FORUM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Milliseconds a writer waits on a locked database
    #[arg(long, env = "FORUM_BUSY_TIMEOUT_MS")]
    busy_timeout_ms: Option<u32>,

    /// Extra attempts after a path conflict on post creation
    #[arg(long, env = "FORUM_ALLOCATION_RETRIES")]
    allocation_retries: Option<u32>,
}

impl Args {
    /// Flags override whatever `Config::from_env` resolved
    fn into_config(self) -> Config {
        let mut config = Config::from_env();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database) = self.database {
            config.database_path = database;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if let Some(busy_timeout_ms) = self.busy_timeout_ms {
            config.busy_timeout_ms = busy_timeout_ms;
        }
        if let Some(allocation_retries) = self.allocation_retries {
            config.allocation_retries = allocation_retries;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let config = Args::parse().into_config();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting forum-server v{}", env!("CARGO_PKG_VERSION"));

    let store = SqliteStore::with_config(SqliteConfig::from(&config))?;
    tracing::info!(path = %config.database_path, "storage opened");

    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
