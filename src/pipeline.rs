//! Sequences the stages of a run.
//!
//! ```text
//! token -> extract -> transform (-> artist images) -> load
//! ```
//!
//! Stages run one after another with no branching between them. The first
//! three stages are fatal on error; the load stage reports its outcome in
//! the returned [`RunReport`].

use reqwest::Client;

use crate::{
    Res,
    config::Config,
    info,
    loader::{self, LoadOutcome},
    spotify,
    transform,
    types::PlayRecord,
};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Play events returned by the extractor.
    pub extracted: usize,
    /// Rows handed to the loader.
    pub transformed: usize,
    pub load: LoadOutcome,
}

/// Runs token exchange, extraction and transformation.
///
/// Shared by [`run`] and the preview command. Returns the number of
/// extracted items and the enriched rows, `None` when nothing was played.
pub async fn extract_and_transform(
    client: &Client,
    config: &Config,
) -> Res<(usize, Option<Vec<PlayRecord>>)> {
    info!("Requesting a new access token...");
    let token = spotify::auth::refresh_access_token(
        client,
        &config.credentials,
        &config.endpoints,
        &config.refresh_token,
    )
    .await?;

    let raw = spotify::player::recently_played(client, &config.endpoints, &token).await?;
    let extracted = raw.items.as_ref().map(Vec::len).unwrap_or(0);

    let records = transform::transform(client, config, &token, &raw).await?;
    Ok((extracted, records))
}

/// Executes one complete run of the pipeline.
///
/// # Errors
///
/// Any error from the token, extract or transform stages. A failed load is
/// not an error; it is reported as [`LoadOutcome::Failed`].
pub async fn run(config: &Config) -> Res<RunReport> {
    let client = Client::new();

    let (extracted, records) = extract_and_transform(&client, config).await?;
    let transformed = records.as_ref().map(Vec::len).unwrap_or(0);

    let load = loader::load(&config.database, records.as_deref()).await;

    Ok(RunReport {
        extracted,
        transformed,
        load,
    })
}
