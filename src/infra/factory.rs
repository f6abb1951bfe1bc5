use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::{DraftCache, EventRepository};
use crate::domain::wizard::{editors::AudienceCatalog, session::SessionRegistry};
use crate::error::AppError;
use crate::infra::notifier::TracingNotifier;
use crate::infra::repositories::{
    memory_draft_cache::InMemoryDraftCache, memory_event_repo::InMemoryEventRepo,
    sqlite_draft_cache::SqliteDraftCache, sqlite_event_repo::SqliteEventRepo,
};
use crate::state::AppState;

pub const DEFAULT_VENUES: &[&str] = &[
    "Main Auditorium",
    "Seminar Hall A",
    "Seminar Hall B",
    "Open Air Theatre",
    "Sports Complex",
    "Library Conference Room",
];

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let (event_repo, draft_cache): (Arc<dyn EventRepository>, Arc<dyn DraftCache>) = if config.uses_sqlite() {
        info!("Initializing SQLite connection with WAL Mode...");
        let pool = connect_sqlite(&config.database_url).await?;
        (
            Arc::new(SqliteEventRepo::new(pool.clone())),
            Arc::new(SqliteDraftCache::new(pool)),
        )
    } else {
        info!("Using in-memory event collection and draft cache");
        (
            Arc::new(InMemoryEventRepo::new()),
            Arc::new(InMemoryDraftCache::new()),
        )
    };

    Ok(AppState {
        config: config.clone(),
        event_repo,
        draft_cache,
        notifier: Arc::new(TracingNotifier),
        sessions: Arc::new(SessionRegistry::new()),
        catalog: Arc::new(AudienceCatalog::standard()),
        venues: Arc::new(DEFAULT_VENUES.iter().map(|v| v.to_string()).collect()),
    })
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    run_sqlite_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run SQLite migrations: {}", e)))
}
