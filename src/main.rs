use jpapi::cache::CachedExecutor;
use jpapi::config::AppConfig;
use jpapi::entities;
use jpapi::routes::{AppState, router};
use sea_orm::Database;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .compact()
        .init();

    for config in &entities::ALL {
        if let Err(problem) = config.check() {
            tracing::error!(%problem, "inconsistent entity configuration");
        }
    }

    let config = AppConfig::from_env();
    if config.api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; every request will be rejected");
    }

    let db = Database::connect(&config.database_url).await?;
    let state = if config.cache_ttl.is_zero() {
        AppState::new(db, config.api_keys)
    } else {
        tracing::info!(ttl_secs = config.cache_ttl.as_secs(), "response cache enabled");
        AppState::new(CachedExecutor::new(db, config.cache_ttl), config.api_keys)
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
