use todo_api::config::ApiConfig;
use todo_api::routes::create_router;
use todo_api::server;
use todo_api::state::AppState;
use todo_infrastructure::{RepositoryConfig, RepositoryFactory};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("Failed to load .env: {error}");
        }
    }

    init_tracing();

    let api_config = ApiConfig::from_env()?;
    let repository_config = RepositoryConfig::from_env()?;

    tracing::info!(
        storage_mode = ?repository_config.storage_mode,
        base_path = %api_config.base_path,
        allowed_origin = %api_config.allowed_origin,
        "Starting todo server"
    );

    let task_repository = RepositoryFactory::new(repository_config)
        .create()
        .await
        .map_err(|error| anyhow::anyhow!("Failed to initialize storage: {error}"))?;

    let router = create_router(AppState::new(task_repository), &api_config);

    server::serve(router, &api_config.server).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("todo_api=debug,todo_infrastructure=debug,tower_http=debug,info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
