//! Embedded schema migrations
//!
//! SQL files live in `agenda-shared/migrations/` and are compiled into the
//! binary by `sqlx::migrate!`.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

