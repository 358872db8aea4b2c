//! Appends transformed rows to the destination table.
//!
//! The loader never fails a run. Whatever happens while connecting or
//! writing is returned as [`LoadOutcome::Failed`] and the caller decides how
//! to report it.

use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};

use crate::{
    config::DatabaseConfig,
    info, success,
    types::{PLAY_RECORD_COLUMNS, PlayRecord},
    warning,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing to load; no connection was opened.
    Skipped,
    /// Number of rows appended.
    Loaded(u64),
    /// Connection or write error message.
    Failed(String),
}

impl LoadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }
}

/// Appends `records` to the configured table.
///
/// Empty or absent input short-circuits to [`LoadOutcome::Skipped`]. Rows are
/// written with a single multi-row `INSERT` over one connection that is
/// closed afterwards. The table must already exist; no schema changes are
/// made and no index column is written.
pub async fn load(database: &DatabaseConfig, records: Option<&[PlayRecord]>) -> LoadOutcome {
    let records = match records {
        Some(records) if !records.is_empty() => records,
        _ => {
            info!("No data was loaded into the database.");
            return LoadOutcome::Skipped;
        }
    };

    match append(database, records).await {
        Ok(rows) => {
            success!("Successfully loaded {} rows into the database!", rows);
            LoadOutcome::Loaded(rows)
        }
        Err(e) => {
            warning!("Error during data load: {}", e);
            LoadOutcome::Failed(e.to_string())
        }
    }
}

async fn append(database: &DatabaseConfig, records: &[PlayRecord]) -> Result<u64, sqlx::Error> {
    let mut conn = PgConnection::connect_with(&database.connect_options()).await?;

    let mut query = insert_query(&database.table, records);
    let result = query.build().execute(&mut conn).await;

    // close regardless of the insert result, but report the insert error first
    let closed = conn.close().await;
    let rows = result?.rows_affected();
    closed?;

    Ok(rows)
}

/// Builds the multi-row `INSERT` for `records`.
pub fn insert_query<'a>(table: &str, records: &'a [PlayRecord]) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        table,
        PLAY_RECORD_COLUMNS.join(", ")
    ));

    query.push_values(records, |mut row, record| {
        row.push_bind(&record.play_id)
            .push_bind(&record.track_id)
            .push_bind(&record.track_name)
            .push_bind(record.track_length_seconds)
            .push_bind(record.track_popularity)
            .push_bind(&record.played_at)
            .push_bind(&record.context_type)
            .push_bind(&record.album)
            .push_bind(&record.album_cover)
            .push_bind(&record.album_type)
            .push_bind(record.album_release_date)
            .push_bind(&record.artists)
            .push_bind(&record.artist_id)
            .push_bind(&record.artist_image);
    });

    query
}
