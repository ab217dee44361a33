//! Server entry point. Configuration comes from the environment (and `.env`).

use routine_api::{
    app, apply_migrations, connect, default_registry, seed, AppState, CachePolicy,
    PgCompanyRepository, Settings, REQUIRED_PAIRS,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("routine_api=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let mappings = default_registry();
    mappings.ensure_resolvable(REQUIRED_PAIRS)?;

    let pool = connect(&settings).await?;
    apply_migrations(&pool).await?;
    if settings.seed_data {
        seed(&pool).await?;
    }

    let state = AppState::new(Arc::new(PgCompanyRepository::new(pool)), mappings);
    let cache = CachePolicy {
        max_age: settings.cache_max_age,
    };
    let router = app(state, cache, settings.max_body_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
