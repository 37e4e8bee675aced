use anyhow::Context;
use samyoga::api::create_routes;
use samyoga::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use samyoga::state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("samyoga={0},tower_http={0}", config.log_level))),
        )
        .init();

    info!(config = ?config, "configuration loaded");

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config
        .create_pool()
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let seeder = DatabaseSeeder::new(pool.clone());
    if let Some(admin) = &config.admin_seed {
        seeder.ensure_admin(admin).await?;
    }
    if config.seed_demo {
        seeder.seed_demo(&config.studio_instructor).await?;
    }

    let address = config.server_address();
    let state = AppState::new(pool, config)?;
    state
        .auth_service
        .purge_expired_tokens()
        .await
        .context("Failed to purge expired tokens")?;
    let app = create_routes(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Samyoga server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
