// School Registry - Web Server
// REST API with Axum over a single shared registry

use anyhow::{Context, Result};
use school_registry::api::router;
use school_registry::{init_tracing, load_roster, seed_registry, RegistryConfig, SharedRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = RegistryConfig::from_env()?;
    let registry = SharedRegistry::new(config.owner.clone());
    tracing::info!(owner = %config.owner, "registry created");

    if let Some(path) = &config.roster {
        let rows = load_roster(path)?;
        let ids = seed_registry(&registry, &config.owner, &rows)?;
        tracing::info!(count = ids.len(), roster = ?path, "roster loaded");
    }

    let app = router(registry);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!("server running on http://{}", config.bind);
    tracing::info!("API: http://{}/api/students", config.bind);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
