// Main entry point for API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use extraction::{ProductExtractor, UrlValidator, ValidatedFetcher};
use server_core::domains::lists::ListService;
use server_core::server::{build_app, AppState};
use server_core::store::{KvStore, MemoryKvStore, PostgresKvStore};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,server_core=debug,extraction=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WishPocket API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let store = connect_store(&config).await?;

    let purged = store
        .purge_expired()
        .await
        .context("Failed to purge expired lists")?;
    tracing::info!(purged, backend = store.name(), "List store ready");

    let lists = ListService::new(store, config.list_ttl());
    let extractor = build_extractor(&config)?;

    // Build application
    let app = build_app(AppState::new(lists, extractor), &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn connect_store(config: &Config) -> Result<Arc<dyn KvStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, lists are kept in memory only");
        return Ok(Arc::new(MemoryKvStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    Ok(Arc::new(PostgresKvStore::new(pool)))
}

fn build_extractor(config: &Config) -> Result<ProductExtractor> {
    let validator = if config.scrape_allow_private_hosts {
        tracing::warn!("SCRAPE_ALLOW_PRIVATE_HOSTS is set, private addresses can be scraped");
        UrlValidator::permissive()
    } else {
        UrlValidator::new()
    };

    let timeout = config.scrape_timeout_secs.map(Duration::from_secs);
    let fetcher =
        ValidatedFetcher::http(validator, timeout).context("Failed to build HTTP client")?;

    Ok(ProductExtractor::with_fetcher(fetcher))
}
