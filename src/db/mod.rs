//! Database module for SQLite access.
//!
//! The roster service only reads. The schema is created here so the service
//! can run standalone against an empty database.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS work_packages (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            parent_id INTEGER REFERENCES work_packages(id) ON DELETE CASCADE,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS roster_templates (
            id INTEGER PRIMARY KEY,
            person_id INTEGER NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            cycle_start_date TEXT,
            mon_a_hours REAL NOT NULL DEFAULT 0,
            tue_a_hours REAL NOT NULL DEFAULT 0,
            wed_a_hours REAL NOT NULL DEFAULT 0,
            thu_a_hours REAL NOT NULL DEFAULT 0,
            fri_a_hours REAL NOT NULL DEFAULT 0,
            sat_a_hours REAL NOT NULL DEFAULT 0,
            sun_a_hours REAL NOT NULL DEFAULT 0,
            mon_b_hours REAL NOT NULL DEFAULT 0,
            tue_b_hours REAL NOT NULL DEFAULT 0,
            wed_b_hours REAL NOT NULL DEFAULT 0,
            thu_b_hours REAL NOT NULL DEFAULT 0,
            fri_b_hours REAL NOT NULL DEFAULT 0,
            sat_b_hours REAL NOT NULL DEFAULT 0,
            sun_b_hours REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS roster_days (
            id INTEGER PRIMARY KEY,
            person_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'work',
            planned_hours REAL,
            actual_hours REAL,
            note TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (person_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS roster_day_work (
            id INTEGER PRIMARY KEY,
            person_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            work_package_id INTEGER NOT NULL REFERENCES work_packages(id) ON DELETE RESTRICT,
            hours REAL NOT NULL DEFAULT 0,
            UNIQUE (person_id, date, work_package_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for the month queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_roster_templates_person ON roster_templates(person_id, start_date);
        CREATE INDEX IF NOT EXISTS idx_roster_days_person_date ON roster_days(person_id, date);
        CREATE INDEX IF NOT EXISTS idx_roster_day_work_person_date ON roster_day_work(person_id, date);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
