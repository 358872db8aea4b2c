use reqwest::Client;
use tabled::Table;

use crate::{config::Config, error, info, pipeline, types::PlayRecordTableRow};

/// Extracts and transforms like a normal run, then prints the rows instead
/// of loading them.
pub async fn preview(config: &Config) {
    let client = Client::new();
    let records = match pipeline::extract_and_transform(&client, config).await {
        Ok((_, records)) => records.unwrap_or_default(),
        Err(e) => error!("Pipeline aborted: {}", e),
    };

    if records.is_empty() {
        info!("Nothing to preview.");
        return;
    }

    let table_rows: Vec<PlayRecordTableRow> =
        records.iter().map(PlayRecordTableRow::from).collect();
    println!("{}", Table::new(table_rows));
}
