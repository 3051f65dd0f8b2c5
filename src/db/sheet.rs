use crate::prelude::*;
use sqlx::SqlitePool;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Zero-based column offsets of the channel sheet.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub header_rows: usize,
    pub channel_id: usize,
    pub url: usize,
    pub latest_token: usize,
    pub notified_token: usize,
    pub duration: usize,
    pub recipients_start: usize,
    pub recipients_stride: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_rows: 1,
            channel_id: 2,
            url: 3,
            latest_token: 4,
            notified_token: 5,
            duration: 6,
            recipients_start: 0,
            recipients_stride: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRow {
    pub index: usize,
    pub cells: Vec<String>,
}

impl ChannelRow {
    pub fn cell(&self, col_index: usize) -> &str {
        self.cells.get(col_index).map(String::as_str).unwrap_or("")
    }
}

/// Rows below the header that name a channel.
pub fn channel_rows(rows: Vec<Vec<String>>, layout: &SheetLayout) -> Vec<ChannelRow> {
    rows.into_iter()
        .enumerate()
        .skip(layout.header_rows)
        .map(|(index, cells)| ChannelRow { index, cells })
        .filter(|row| !row.cell(layout.channel_id).trim().is_empty())
        .collect()
}

pub trait SheetStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>>;
    async fn write_cell(&self, row_index: usize, col_index: usize, value: &str) -> Result<()>;
}

pub struct SqliteSheet {
    pool: SqlitePool,
}

impl SqliteSheet {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_empty(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cells")
            .fetch_one(&self.pool)
            .await?;

        Ok(count == 0)
    }

    /// Loads a tab-separated sheet, header line included. Does nothing if the
    /// sheet already has cells.
    pub async fn seed_from_tsv(&self, tsv_path: &Path) -> Result<usize> {
        if !self.is_empty().await? {
            tracing::info!("Sheet already populated. Skipping seed from {}.", tsv_path.display());
            return Ok(0);
        }

        let reader = BufReader::new(File::open(tsv_path)?);
        let mut tx = self.pool.begin().await?;
        let mut seeded = 0;
        for (row_index, line) in reader.lines().enumerate() {
            let line = line?;
            for (col_index, value) in line.split('\t').enumerate() {
                if value.is_empty() {
                    continue;
                }

                sqlx::query("INSERT INTO cells (row_index, col_index, value) VALUES (?, ?, ?)")
                    .bind(i64::try_from(row_index)?)
                    .bind(i64::try_from(col_index)?)
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
            }
            seeded += 1;
        }
        tx.commit().await?;

        tracing::info!("Seeded {} sheet rows from {}", seeded, tsv_path.display());
        Ok(seeded)
    }
}

impl SheetStore for SqliteSheet {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        let cells: Vec<(i64, i64, String)> = sqlx::query_as(
            "SELECT row_index, col_index, value FROM cells ORDER BY row_index, col_index",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_index, col_index, value) in cells {
            let row_index = usize::try_from(row_index)?;
            let col_index = usize::try_from(col_index)?;
            if rows.len() <= row_index {
                rows.resize_with(row_index + 1, Vec::new);
            }

            let row = &mut rows[row_index];
            if row.len() <= col_index {
                row.resize(col_index + 1, String::new());
            }
            row[col_index] = value;
        }

        Ok(rows)
    }

    async fn write_cell(&self, row_index: usize, col_index: usize, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO cells (row_index, col_index, value) VALUES (?, ?, ?)
            ON CONFLICT (row_index, col_index) DO UPDATE SET value = excluded.value",
        )
        .bind(i64::try_from(row_index)?)
        .bind(i64::try_from(col_index)?)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
