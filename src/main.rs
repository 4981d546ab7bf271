use std::sync::Arc;

use cinematch_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{MovieProvider, TmdbProvider},
        RecommendationService,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let provider: Arc<dyn MovieProvider> = Arc::new(TmdbProvider::new(config.tmdb())?);
    tracing::info!(provider = provider.name(), "Movie provider ready");

    let recommender = RecommendationService::new(provider, config.recommendation_settings());
    let app = create_router(AppState::new(recommender));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
