use crate::{config::Config, error, loader::LoadOutcome, pipeline, success, warning};

/// Runs the pipeline and maps its result to the process exit status.
///
/// Fatal stage errors exit with status 1. A failed load is reported but the
/// process still ends successfully.
pub async fn run(config: &Config) {
    let report = match pipeline::run(config).await {
        Ok(report) => report,
        Err(e) => error!("Pipeline aborted: {}", e),
    };

    match report.load {
        LoadOutcome::Failed(_) => warning!(
            "Run finished, but {} transformed rows were not loaded.",
            report.transformed
        ),
        LoadOutcome::Loaded(_) | LoadOutcome::Skipped => success!(
            "Run finished: {} extracted, {} transformed.",
            report.extracted,
            report.transformed
        ),
    }
}
