use crate::prelude::*;
use sqlx::{sqlite::SqliteConnectOptions, Executor, SqlitePool};
use std::path::Path;

pub async fn get_db_pool(db_path: &Path) -> Result<SqlitePool> {
    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal),
    )
    .await?)
}

pub async fn create_sheet_db(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        "CREATE TABLE IF NOT EXISTS cells (
            row_index INTEGER NOT NULL,
            col_index INTEGER NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (row_index, col_index)
        )",
    )
    .await?;

    Ok(())
}
