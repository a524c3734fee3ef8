use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::info;

use crate::config::{self, DatabaseConfig};

/// Opens the pool for the tax professional store, creating the SQLite file
/// when it does not exist yet.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let db_url = &cfg.url;
    config::ensure_sqlite_parent_dir(db_url)?;
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", db_url);
        Sqlite::create_database(db_url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(db_url)
        .await?;

    if cfg.ping_on_startup {
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("error pinging database {}: {}", db_url, e))?;
        info!("Database connected");
    }
    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    // ero: one row per electronic return originator
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS ero (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            efin TEXT NOT NULL,
            company_name TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    // eroyeardetail: per-season volume and import status
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS eroyeardetail (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ero_id INTEGER NOT NULL,
            systemyear TEXT NOT NULL,
            prior_volume INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            last_import_date TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(ero_id) REFERENCES ero(id) ON DELETE CASCADE
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_ero_efin", "CREATE INDEX IF NOT EXISTS idx_ero_efin ON ero(efin)"),
        (
            "idx_eroyeardetail_ero_year",
            "CREATE INDEX IF NOT EXISTS idx_eroyeardetail_ero_year ON eroyeardetail(ero_id, systemyear)",
        ),
    ];
    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }

    Ok(())
}
