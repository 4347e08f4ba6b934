mod app;
mod config;
mod connectivity;
mod handlers;
mod rls;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cloudfns_core::storage::ItemRepository;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    connectivity::ConnectivityCheck,
    rls::{DbTarget, RlsDemo, SecretsManagerProvider},
    state::AppState,
};

/// cloudfns - RLS demo, connectivity check and items CRUD handlers
#[derive(Parser, Debug)]
#[command(name = "cloudfns")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env();

    // Initialize tracing subscriber
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "cloudfns=debug,tower_http=debug".into()),
    );
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let mut sdk_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.aws_region {
        sdk_loader = sdk_loader.region(aws_config::Region::new(region.clone()));
    }
    let sdk_config = sdk_loader.load().await;

    let item_repo = init_item_repository(&config, &sdk_config);

    let connectivity =
        ConnectivityCheck::new(&config.connectivity_url, config.connectivity_timeout())?;

    let rls = RlsDemo::new(
        Arc::new(SecretsManagerProvider::new(&sdk_config)),
        DbTarget {
            host: config.db_host.clone(),
            port: config.db_port,
            secret_name: config.db_secret_name.clone(),
        },
    );
    if config.db_host.is_none() || config.db_secret_name.is_none() {
        tracing::warn!("DB_HOST or DB_SECRET_NAME not set, /rls-demo will fail until configured");
    }

    let state = AppState::new(item_repo, connectivity, rls);

    // Build the application router
    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "dynamodb")]
fn init_item_repository(
    config: &Config,
    sdk_config: &aws_config::SdkConfig,
) -> Arc<dyn ItemRepository> {
    let repo = storage::DynamoDbItemRepository::from_sdk_config(
        sdk_config,
        config.aws_endpoint_url.as_deref(),
        &config.items_table_name,
    );
    tracing::info!(
        table = repo.table_name(),
        endpoint = ?config.aws_endpoint_url,
        "Using DynamoDB item storage"
    );
    Arc::new(repo)
}

#[cfg(feature = "inmemory")]
fn init_item_repository(
    _config: &Config,
    _sdk_config: &aws_config::SdkConfig,
) -> Arc<dyn ItemRepository> {
    tracing::info!("Using in-memory item storage");
    Arc::new(storage::InMemoryItemRepository::new())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
