use leaderboard_api::api::{router, AppState};
use leaderboard_api::config::AppConfig;
use leaderboard_api::infrastructure::seed::seed_test_data;
use leaderboard_api::infrastructure::storage::{connect_postgres, Repositories};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leaderboard_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (.env first, then the environment)
    let config = AppConfig::from_env()?;

    let repositories = match &config.database_url {
        Some(url) => Repositories::postgres(connect_postgres(url, config.max_connections).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Repositories::in_memory()
        }
    };

    if config.use_test_data {
        seed_test_data(&repositories).await?;
    }

    let app = router(AppState::new(repositories));

    // Start server
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
