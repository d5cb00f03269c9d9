use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod jobs;
mod models;
mod scheduler;
mod views;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "progress_tracker=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    // Database
    let db = db::create_pool(&config.database_url).await?;
    db::run_migrations(&db).await?;

    tracing::info!(database = %config.database_url, "Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    // Purge stale incomplete entries in the background
    jobs::cleanup::spawn_cleanup_worker(state.db.clone(), state.config.cleanup_schedule);

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::entries::home))
        .route("/add", get(handlers::entries::new_entry_form))
        .route("/submit", post(handlers::entries::submit_entry))
        .route("/entries", get(handlers::entries::list_entries))
        .route("/entries/:date", get(handlers::entries::view_entry))
        .route(
            "/update/:date",
            get(handlers::entries::edit_entry_form).post(handlers::entries::update_entry),
        )
        .route("/delete/:date", post(handlers::entries::delete_entry))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub fn test_state(db: SqlitePool) -> AppState {
    AppState {
        db,
        config: Arc::new(Config {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            cleanup_schedule: scheduler::Schedule::Every(std::time::Duration::from_secs(86_400)),
        }),
    }
}
