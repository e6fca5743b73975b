use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use villaroli_booking::booking;
use villaroli_booking::cache::HolidayCache;
use villaroli_booking::config::{AppConfig, RateCard};
use villaroli_booking::holidays::WindowPolicy;
use villaroli_booking::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    info!("Connecting to database...");
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&db).await?;

    let state = AppState {
        db: db.clone(),
        holidays: HolidayCache::new(),
        rates: Arc::new(RateCard::default()),
        window: WindowPolicy::default(),
        default_property_id: config.default_property_id,
    };

    // Release dates held by stale pending bookings.
    tokio::spawn(booking::services::start_expiry_sweeper(db));

    let app = booking::router()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("Starting server at http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
