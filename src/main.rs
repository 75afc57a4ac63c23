use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yummy_api::{config::AppConfig, create_router, db, AppState};

/// Initialize the tracing subscriber
/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yummy_api=debug,tower_http=info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    init_tracing();

    tracing::info!("Yummy Recipes API - Starting...");

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&db_pool).await?;

    let app = create_router(AppState::new(db_pool, &config));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Yummy Recipes API is running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
