use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::cache::{RedisConfig, RedisPool};
use common::database::{self, DatabaseConfig};
use common::item_store::PgItemStore;
use common::session::RedisSessionStore;

use bot::config::{BotConfig, LineConfig};
use bot::line::LineClient;
use bot::routes;
use bot::scheduler::ExpiryChecker;
use bot::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting stockpile bot service");

    let line_config = LineConfig::from_env()?;
    let bot_config = BotConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize Redis for session storage
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;

    let items = Arc::new(PgItemStore::new(pool));
    let sessions = Arc::new(RedisSessionStore::new(redis_pool));
    let notifier = Arc::new(LineClient::new(&line_config));

    let app_state = AppState {
        items: items.clone(),
        sessions,
        notifier: notifier.clone(),
        channel_secret: line_config.channel_secret.clone(),
    };

    // Start the periodic expiry check
    let checker = ExpiryChecker::new(items, notifier);
    checker.start(&bot_config.notify_cron).await?;

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bot_config.bind_addr).await?;
    info!("Bot service listening on {}", bot_config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
