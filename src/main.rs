use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use packing_assistant::clock::{Clock, SystemClock};
use packing_assistant::config::Config;
use packing_assistant::db::DatabasePool;
use packing_assistant::services::{PackingHistoryService, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packing_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting packing assistant server...");

    // Config files first, plain environment variables otherwise
    let config = match Config::new() {
        Ok(config) => config,
        Err(err) => {
            warn!("Layered configuration unavailable ({}), reading environment", err);
            Config::from_env()?
        }
    };
    info!("Configuration loaded: {:?}", config);

    let db_pool = DatabasePool::new(&config).await?;
    info!("Database connection established ({})", db_pool.backend_name());

    db_pool.migrate().await?;
    info!("Database migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let app_state = (
        Arc::new(UserService::new(db_pool.clone(), clock.clone())),
        Arc::new(PackingHistoryService::new(db_pool, clock)),
    );
    let app = packing_assistant::app(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
