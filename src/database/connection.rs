use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    if is_sqlite_memory(database_url) {
        // Every connection to an in-memory SQLite database sees its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(20).min_connections(1);
    }

    opt.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

fn is_sqlite_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite") && database_url.contains(":memory:")
}

/// Builds a SQLite URL for a local database file, creating the file when missing.
pub fn sqlite_file_url(path: &std::path::Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}
