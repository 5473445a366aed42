use rusty_blog::{Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_blog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting rusty-blog");
    tracing::info!("Web server will listen on: {}", config.web_addr());

    let db_pool = rusty_blog::db::create_pool(&config.database_url).await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let app_state = rusty_blog::web::AppState::new(db_pool);

    rusty_blog::web::serve(config.web_addr(), app_state).await
}
