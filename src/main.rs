use club_events::{
    routes, AppConfig, AppState, EventRepository, InMemoryEventRepository, InMemorySessionStore,
    PostgresEventRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "club_events=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting club events server");

    let config = AppConfig::from_env();
    if config.uses_default_password() {
        warn!("ADMIN_PASSWORD is not set, falling back to the default password");
    }

    // Sessions always live in memory; a restart logs the admin out
    let session_store = Arc::new(InMemorySessionStore::new());

    let event_repository: Arc<dyn EventRepository + Send + Sync> = match &config.database_url {
        Some(database_url) => {
            info!("Using PostgreSQL event repository");
            let pool = PgPool::connect(database_url).await?;
            let repository = PostgresEventRepository::new(pool);
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        None => {
            info!("DATABASE_URL not set, using in-memory event repository");
            Arc::new(InMemoryEventRepository::new())
        }
    };

    let app_state = AppState::new(
        session_store,
        event_repository,
        config.admin_password.as_str(),
    );
    let app = routes::app(app_state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
