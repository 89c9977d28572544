use std::sync::Arc;

use auth::Authenticator;
use task_service::config::Config;
use task_service::config::DatabaseBackend;
use task_service::inbound::http::router::create_router;
use task_service::inbound::http::router::AppState;
use task_service::outbound::repositories::InMemoryStore;
use task_service::outbound::repositories::MongoClient;
use task_service::outbound::repositories::MongoProjectRepository;
use task_service::outbound::repositories::MongoTaskRepository;
use task_service::outbound::repositories::MongoTeamRepository;
use task_service::outbound::repositories::MongoUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_backend = ?config.database.backend,
        database_name = %config.database.name,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let settings = config.auth_settings().map_err(|e| {
        tracing::error!(error = %e, "Refusing to start without valid auth settings");
        anyhow::anyhow!("invalid auth settings: {}", e)
    })?;
    let authenticator = Arc::new(Authenticator::new(settings)?);

    let state = match config.database.backend {
        DatabaseBackend::Memory => {
            let store = Arc::new(InMemoryStore::new());
            tracing::warn!(database = "memory", "Using in-memory store, data is lost on exit");
            AppState::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                authenticator,
            )
        }
        DatabaseBackend::Mongo => {
            let client = MongoClient::connect(&config.database.url, &config.database.name).await?;
            tracing::info!(
                database = "mongodb",
                name = %config.database.name,
                "Database connection established"
            );

            AppState::new(
                Arc::new(MongoUserRepository::new(&client).await?),
                Arc::new(MongoProjectRepository::new(&client).await?),
                Arc::new(MongoTeamRepository::new(&client).await?),
                Arc::new(MongoTaskRepository::new(&client).await?),
                authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
