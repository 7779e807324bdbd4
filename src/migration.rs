//! Schema DDL. Migrations run in order; progress is kept in `PRAGMA user_version`
//! so re-running at startup only applies what is new.

use crate::error::AppError;
use sqlx::SqlitePool;

const MIGRATIONS: &[&[&str]] = &[
    // 1: users and bikes. A bike is rented exactly when it has a renter.
    &[
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone_num INTEGER NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS bikes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            longitude INTEGER NOT NULL,
            latitude INTEGER NOT NULL,
            available BOOLEAN NOT NULL DEFAULT 1,
            user_id INTEGER REFERENCES users (id) ON DELETE RESTRICT,
            CHECK ((available = 1 AND user_id IS NULL) OR (available = 0 AND user_id IS NOT NULL))
        )
        "#,
    ],
    // 2: lookup paths for the availability filter and per-user listing.
    &[
        "CREATE INDEX IF NOT EXISTS idx_bikes_available ON bikes (available)",
        "CREATE INDEX IF NOT EXISTS idx_bikes_user_id ON bikes (user_id)",
    ],
];

/// Latest schema version this build knows about.
pub fn schema_version() -> i64 {
    MIGRATIONS.len() as i64
}

/// Apply every migration newer than the database's recorded version. Each step is one transaction.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    let (current,): (i64,) = sqlx::query_as("PRAGMA user_version").fetch_one(pool).await?;
    for (idx, statements) in MIGRATIONS.iter().enumerate() {
        let version = idx as i64 + 1;
        if version <= current {
            continue;
        }
        let mut tx = pool.begin().await?;
        for sql in statements.iter() {
            tracing::debug!(sql = %sql.trim(), "migration");
            sqlx::query(*sql).execute(&mut *tx).await?;
        }
        // PRAGMA does not take bind parameters.
        sqlx::query(&format!("PRAGMA user_version = {}", version))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version, "applied migration");
    }
    Ok(())
}
